use super::{validate, ArgumentSpec, ArgumentType, ArgumentValue, ValidationStatus};
use crate::sender::SenderKinds;
use crate::testkit::{Broken, Choices, TestSender};
use cmdo_common::error::CmdoError;
use cmdo_common::ids::SenderKind;
use cmdo_time::CalendarDurationParser;
use googletest::prelude::*;
use rstest::rstest;

fn check(argument: &ArgumentSpec, value: &str) -> std::result::Result<(), ValidationStatus> {
    validate(
        argument,
        &TestSender::console(),
        value,
        &[],
        &CalendarDurationParser::default(),
    )
}

#[rstest]
fn untyped_argument_defaults_to_string() {
    let argument = ArgumentSpec::builder("player")
        .create()
        .expect("plain argument is valid");
    assert_that!(argument.argument_type(), eq(ArgumentType::String));
    assert_that!(argument.min_length(), eq(1_usize));
    assert_that!(argument.is_tab_completion_active(), eq(true));
    assert_that!(argument.is_optional(), eq(false));
}

#[rstest]
fn bounds_freeze_untyped_argument_to_number() {
    let argument = ArgumentSpec::builder("amount")
        .min(1.0)
        .and_then(|builder| builder.max(64.0))
        .and_then(|builder| builder.create())
        .expect("bounded argument is valid");
    assert_that!(argument.argument_type(), eq(ArgumentType::Number));
}

#[rstest]
fn handler_freezes_untyped_argument_to_other() {
    let argument = ArgumentSpec::builder("world")
        .handler(Choices::new(&["world", "world_nether"]))
        .and_then(|builder| builder.create())
        .expect("handler argument is valid");
    assert_that!(argument.argument_type(), eq(ArgumentType::Other));
    assert_that!(argument.effective_handler().is_ok_and(|handler| handler.is_some()), eq(true));
}

#[rstest]
fn setting_an_option_twice_fails() {
    let Err(error) = ArgumentSpec::builder("amount")
        .min(1.0)
        .and_then(|builder| builder.min(2.0))
    else {
        panic!("second min must fail");
    };
    assert_that!(&error, eq(&CmdoError::AlreadySet("min")));
}

#[rstest]
#[case::min_above_max(ArgumentSpec::builder("n").max(5.0).and_then(|b| b.min(6.0)).map(|_| ()))]
#[case::max_below_min(ArgumentSpec::builder("n").min(5.0).and_then(|b| b.max(4.0)).map(|_| ()))]
#[case::min_length_zero(ArgumentSpec::builder("n").min_length(0).map(|_| ()))]
#[case::max_length_zero(ArgumentSpec::builder("n").max_length(0).map(|_| ()))]
#[case::min_length_above_max(
    ArgumentSpec::builder("n").max_length(3).and_then(|b| b.min_length(4)).map(|_| ())
)]
#[case::max_length_below_min(
    ArgumentSpec::builder("n").min_length(4).and_then(|b| b.max_length(3)).map(|_| ())
)]
#[case::bad_pattern(ArgumentSpec::builder("n").pattern("([a-z").map(|_| ()))]
fn contradictory_setters_fail_immediately(#[case] outcome: cmdo_common::error::CmdoResult<()>) {
    assert_that!(outcome.is_err(), eq(true));
}

#[rstest]
#[case::bounds_on_string(
    ArgumentSpec::builder("n").argument_type(ArgumentType::String).and_then(|b| b.min(1.0))
)]
#[case::length_on_integer(
    ArgumentSpec::builder("n").argument_type(ArgumentType::Integer).and_then(|b| b.max_length(3))
)]
#[case::handler_on_primitive(
    ArgumentSpec::builder("n")
        .argument_type(ArgumentType::Duration)
        .and_then(|b| b.handler(Choices::new(&["x"])))
)]
#[case::handler_on_enumerable(
    ArgumentSpec::builder("n")
        .argument_type(ArgumentType::boolean())
        .and_then(|b| b.handler(Choices::new(&["x"])))
)]
#[case::bounds_with_handler(
    ArgumentSpec::builder("n").handler(Choices::new(&["x"])).and_then(|b| b.min(1.0))
)]
#[case::empty_name(Ok(ArgumentSpec::builder(" ")))]
fn incompatible_options_fail_at_create(
    #[case] builder: cmdo_common::error::CmdoResult<super::ArgumentBuilder>,
) {
    let created = builder.and_then(super::ArgumentBuilder::create);
    assert_that!(created.is_err(), eq(true));
}

#[rstest]
fn duplicate_default_for_kind_fails() {
    let outcome = ArgumentSpec::builder("target")
        .default_value(SenderKind::PLAYER, "self")
        .and_then(|builder| builder.default_value(SenderKind::PLAYER, "other"));
    assert_that!(outcome.is_err(), eq(true));
}

#[rstest]
fn self_dependency_fails() {
    let world = ArgumentSpec::builder("world")
        .create()
        .expect("plain argument is valid");
    let outcome = ArgumentSpec::builder("world").depends_on(&world);
    assert_that!(outcome.is_err(), eq(true));
}

#[rstest]
fn default_lookup_falls_back_to_capabilities() {
    const ENTITY: SenderKind = SenderKind::new("entity");
    let mut kinds = SenderKinds::new();
    kinds
        .declare(SenderKind::PLAYER, [ENTITY])
        .expect("player declared once");

    let argument = ArgumentSpec::builder("target")
        .default_value(ENTITY, "nearest")
        .and_then(|builder| builder.default_value(SenderKind::CONSOLE, 0))
        .and_then(|builder| builder.create())
        .expect("defaults are valid");

    let player_default = argument
        .default_for(SenderKind::PLAYER, &kinds)
        .map(|value| value.resolve(&TestSender::player(&[]), &[]));
    assert_that!(
        &player_default,
        eq(&Some(ArgumentValue::Text("nearest".to_owned())))
    );

    let console_default = argument
        .default_for(SenderKind::CONSOLE, &kinds)
        .map(|value| value.resolve(&TestSender::console(), &[]).render());
    assert_that!(&console_default, eq(&Some("0".to_owned())));

    let other = argument.default_for(SenderKind::new("command_block"), &kinds);
    assert_that!(other.is_none(), eq(true));
}

#[rstest]
fn computed_default_receives_dependencies() {
    let argument = ArgumentSpec::builder("amount")
        .default_with(SenderKind::CONSOLE, |_sender, dependencies: &[String]| {
            dependencies.first().map(|item| item.len() as i64)
        })
        .and_then(|builder| builder.create())
        .expect("computed default is valid");
    let rendered = argument
        .default_for(SenderKind::CONSOLE, &SenderKinds::new())
        .map(|value| {
            value
                .resolve(&TestSender::console(), &["diamond".to_owned()])
                .render()
        });
    assert_that!(&rendered, eq(&Some("7".to_owned())));
}

#[rstest]
#[case(ArgumentValue::Absent, "")]
#[case(ArgumentValue::Integer(-3), "-3")]
#[case(ArgumentValue::Number(2.5), "2.5")]
#[case(ArgumentValue::Number(1.0), "1")]
#[case(ArgumentValue::Boolean(true), "true")]
#[case(ArgumentValue::Text("default".to_owned()), "default")]
fn values_render_in_natural_form(#[case] value: ArgumentValue, #[case] expected: &str) {
    assert_that!(value.render().as_str(), eq(expected));
}

#[rstest]
#[case("5", Ok(()))]
#[case("1", Ok(()))]
#[case("10", Ok(()))]
#[case("0", Err(ValidationStatus::MinLimit))]
#[case("11", Err(ValidationStatus::MaxLimit))]
#[case("2.5", Err(ValidationStatus::IncorrectType))]
#[case("five", Err(ValidationStatus::IncorrectType))]
fn integer_values_respect_type_and_bounds(
    #[case] value: &str,
    #[case] expected: std::result::Result<(), ValidationStatus>,
) {
    let argument = ArgumentSpec::builder("level")
        .argument_type(ArgumentType::Integer)
        .and_then(|builder| builder.min(1.0))
        .and_then(|builder| builder.max(10.0))
        .and_then(|builder| builder.create())
        .expect("integer argument is valid");
    assert_that!(&check(&argument, value), eq(&expected));
}

#[rstest]
#[case("9007199254740992", Ok(()))]
#[case("9007199254740993", Err(ValidationStatus::MaxLimit))]
#[case("9223372036854775807", Err(ValidationStatus::MaxLimit))]
#[case("-9223372036854775808", Ok(()))]
fn integer_bounds_hold_beyond_float_precision(
    #[case] value: &str,
    #[case] expected: std::result::Result<(), ValidationStatus>,
) {
    let argument = ArgumentSpec::builder("offset")
        .argument_type(ArgumentType::Integer)
        .and_then(|builder| builder.max(9_007_199_254_740_992.0))
        .and_then(|builder| builder.create())
        .expect("integer argument is valid");
    assert_that!(&check(&argument, value), eq(&expected));
}

#[rstest]
#[case("0.5", Ok(()))]
#[case("-0.1", Err(ValidationStatus::MinLimit))]
#[case("1.01", Err(ValidationStatus::MaxLimit))]
#[case("NaN", Err(ValidationStatus::IncorrectType))]
#[case("inf", Err(ValidationStatus::IncorrectType))]
#[case("-Infinity", Err(ValidationStatus::IncorrectType))]
#[case("1e400", Err(ValidationStatus::IncorrectType))]
#[case("half", Err(ValidationStatus::IncorrectType))]
fn number_values_respect_type_and_bounds(
    #[case] value: &str,
    #[case] expected: std::result::Result<(), ValidationStatus>,
) {
    let argument = ArgumentSpec::builder("chance")
        .min(0.0)
        .and_then(|builder| builder.max(1.0))
        .and_then(|builder| builder.create())
        .expect("number argument is valid");
    assert_that!(&check(&argument, value), eq(&expected));
}

#[rstest]
#[case("abc", Ok(()))]
#[case("ab", Err(ValidationStatus::MinLength))]
#[case("abcdef", Err(ValidationStatus::MaxLength))]
#[case("ab1", Err(ValidationStatus::Pattern))]
#[case("äöü", Ok(()))]
fn string_values_respect_length_then_pattern(
    #[case] value: &str,
    #[case] expected: std::result::Result<(), ValidationStatus>,
) {
    let argument = ArgumentSpec::builder("name")
        .min_length(3)
        .and_then(|builder| builder.max_length(5))
        .and_then(|builder| builder.pattern(r"\p{L}+"))
        .and_then(|builder| builder.create())
        .expect("string argument is valid");
    assert_that!(&check(&argument, value), eq(&expected));
}

#[rstest]
#[case("1h,30m", Ok(()))]
#[case("2w", Ok(()))]
#[case("later", Err(ValidationStatus::IncorrectType))]
fn duration_values_must_parse(
    #[case] value: &str,
    #[case] expected: std::result::Result<(), ValidationStatus>,
) {
    let argument = ArgumentSpec::builder("time")
        .argument_type(ArgumentType::Duration)
        .and_then(|builder| builder.create())
        .expect("duration argument is valid");
    assert_that!(&check(&argument, value), eq(&expected));
}

#[rstest]
fn handler_values_are_checked_by_acceptance_test() {
    let argument = ArgumentSpec::builder("animal")
        .handler(Choices::new(&["pig", "cow"]))
        .and_then(|builder| builder.create())
        .expect("handler argument is valid");
    assert_that!(&check(&argument, "pig"), eq(&Ok(())));
    assert_that!(&check(&argument, "wolf"), eq(&Err(ValidationStatus::Other)));
}

#[rstest]
fn failing_handler_rejects_value() {
    let argument = ArgumentSpec::builder("remote")
        .handler(Broken)
        .and_then(|builder| builder.create())
        .expect("handler argument is valid");
    assert_that!(&check(&argument, "anything"), eq(&Err(ValidationStatus::Other)));
}

#[rstest]
#[case("true", Ok(()))]
#[case("false", Ok(()))]
#[case("maybe", Err(ValidationStatus::Other))]
fn boolean_values_must_be_literal(
    #[case] value: &str,
    #[case] expected: std::result::Result<(), ValidationStatus>,
) {
    let argument = ArgumentSpec::builder("silent")
        .argument_type(ArgumentType::boolean())
        .and_then(|builder| builder.create())
        .expect("boolean argument is valid");
    assert_that!(&check(&argument, value), eq(&expected));
}

#[rstest]
fn other_type_accepts_anything() {
    let argument = ArgumentSpec::builder("anything")
        .argument_type(ArgumentType::Other)
        .and_then(|builder| builder.create())
        .expect("other argument is valid");
    assert_that!(&check(&argument, ""), eq(&Ok(())));
}
