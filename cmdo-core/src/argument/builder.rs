use std::sync::Arc;

use cmdo_common::error::{CmdoError, CmdoResult};
use cmdo_common::ids::SenderKind;
use regex::Regex;

use super::{ArgumentSpec, ArgumentType, ArgumentValue, DefaultFn, DefaultValue};
use crate::completers::ArgumentHandler;
use crate::containers::HotMap;
use crate::sender::Sender;

/// Validating builder for [`ArgumentSpec`].
///
/// Every option can be set once. Conflicts with options set earlier are reported by the setter
/// that introduces them; conflicts involving the argument type are reported by [`Self::create`],
/// because the type may still be inferred at that point.
pub struct ArgumentBuilder {
    name: String,
    kind: Option<ArgumentType>,
    min: Option<f64>,
    max: Option<f64>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
    handler: Option<Arc<dyn ArgumentHandler>>,
    defaults: HotMap<SenderKind, DefaultValue>,
    dependencies: Vec<String>,
    catch_remaining: Option<bool>,
    tab_completion: Option<bool>,
    permission: Option<String>,
}

impl ArgumentBuilder {
    /// Creates a builder for an argument named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            pattern: None,
            handler: None,
            defaults: HotMap::new(),
            dependencies: Vec::new(),
            catch_remaining: None,
            tab_completion: None,
            permission: None,
        }
    }

    /// Sets the argument type explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`CmdoError::AlreadySet`] on a second call.
    pub fn argument_type(mut self, kind: ArgumentType) -> CmdoResult<Self> {
        if self.kind.is_some() {
            return Err(CmdoError::AlreadySet("type"));
        }
        self.kind = Some(kind);
        Ok(self)
    }

    /// Inclusive lower bound; an untyped argument becomes `Number`.
    ///
    /// # Errors
    ///
    /// Fails on a second call, on NaN, or when `min` exceeds the current maximum.
    pub fn min(mut self, min: f64) -> CmdoResult<Self> {
        if self.min.is_some() {
            return Err(CmdoError::AlreadySet("min"));
        }
        if min.is_nan() {
            return Err(CmdoError::InvalidArgument("min must be a number".to_owned()));
        }
        if let Some(max) = self.max.filter(|max| min > *max) {
            return Err(CmdoError::InvalidArgument(format!(
                "min {min} is greater than max {max}"
            )));
        }
        self.min = Some(min);
        Ok(self)
    }

    /// Inclusive upper bound; an untyped argument becomes `Number`.
    ///
    /// # Errors
    ///
    /// Fails on a second call, on NaN, or when `max` is below the current minimum.
    pub fn max(mut self, max: f64) -> CmdoResult<Self> {
        if self.max.is_some() {
            return Err(CmdoError::AlreadySet("max"));
        }
        if max.is_nan() {
            return Err(CmdoError::InvalidArgument("max must be a number".to_owned()));
        }
        if let Some(min) = self.min.filter(|min| max < *min) {
            return Err(CmdoError::InvalidArgument(format!(
                "max {max} is less than min {min}"
            )));
        }
        self.max = Some(max);
        Ok(self)
    }

    /// Minimum string length in characters.
    ///
    /// # Errors
    ///
    /// Fails on a second call, below 1, or above the current maximum length.
    pub fn min_length(mut self, min_length: usize) -> CmdoResult<Self> {
        if self.min_length.is_some() {
            return Err(CmdoError::AlreadySet("min length"));
        }
        if min_length < 1 {
            return Err(CmdoError::InvalidArgument(
                "min length must be at least 1".to_owned(),
            ));
        }
        if let Some(max_length) = self.max_length.filter(|max_length| min_length > *max_length) {
            return Err(CmdoError::InvalidArgument(format!(
                "min length {min_length} is greater than max length {max_length}"
            )));
        }
        self.min_length = Some(min_length);
        Ok(self)
    }

    /// Maximum string length in characters.
    ///
    /// # Errors
    ///
    /// Fails on a second call, below 1, or below the current minimum length.
    pub fn max_length(mut self, max_length: usize) -> CmdoResult<Self> {
        if self.max_length.is_some() {
            return Err(CmdoError::AlreadySet("max length"));
        }
        if max_length < 1 {
            return Err(CmdoError::InvalidArgument(
                "max length must be at least 1".to_owned(),
            ));
        }
        if let Some(min_length) = self.min_length.filter(|min_length| max_length < *min_length) {
            return Err(CmdoError::InvalidArgument(format!(
                "max length {max_length} is less than min length {min_length}"
            )));
        }
        self.max_length = Some(max_length);
        Ok(self)
    }

    /// Pattern string values must match in full.
    ///
    /// # Errors
    ///
    /// Fails on a second call or when the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> CmdoResult<Self> {
        if self.pattern.is_some() {
            return Err(CmdoError::AlreadySet("pattern"));
        }
        let anchored = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|error| CmdoError::InvalidPattern(error.to_string()))?;
        self.pattern = Some(anchored);
        Ok(self)
    }

    /// Custom completion and acceptance capability; an untyped argument becomes `Other`.
    ///
    /// # Errors
    ///
    /// Returns [`CmdoError::AlreadySet`] on a second call.
    pub fn handler<H>(mut self, handler: H) -> CmdoResult<Self>
    where
        H: ArgumentHandler + 'static,
    {
        if self.handler.is_some() {
            return Err(CmdoError::AlreadySet("handler"));
        }
        self.handler = Some(Arc::new(handler));
        Ok(self)
    }

    /// Constant default used for senders of `kind` (or kinds declaring it as a capability).
    ///
    /// # Errors
    ///
    /// Fails when `kind` already has a default.
    pub fn default_value(
        self,
        kind: SenderKind,
        value: impl Into<ArgumentValue>,
    ) -> CmdoResult<Self> {
        self.insert_default(kind, DefaultValue::Constant(value.into()))
    }

    /// Default computed per request from the sender and the resolved dependency values.
    ///
    /// # Errors
    ///
    /// Fails when `kind` already has a default.
    pub fn default_with<F, R>(self, kind: SenderKind, producer: F) -> CmdoResult<Self>
    where
        F: Fn(&dyn Sender, &[String]) -> R + Send + Sync + 'static,
        R: Into<ArgumentValue>,
    {
        let computed: DefaultFn =
            Arc::new(move |sender: &dyn Sender, dependencies: &[String]| -> ArgumentValue {
                producer(sender, dependencies).into()
            });
        self.insert_default(kind, DefaultValue::Computed(computed))
    }

    fn insert_default(mut self, kind: SenderKind, value: DefaultValue) -> CmdoResult<Self> {
        if self.defaults.contains_key(&kind) {
            return Err(CmdoError::InvalidArgument(format!(
                "default value for sender kind `{kind}` has already been set"
            )));
        }
        self.defaults.insert(kind, value);
        Ok(self)
    }

    /// Declares a dependency on an argument appended to the same command before this one.
    ///
    /// # Errors
    ///
    /// Fails on a self dependency or when the dependency was declared before.
    pub fn depends_on(mut self, dependency: &ArgumentSpec) -> CmdoResult<Self> {
        let name = dependency.name();
        if name == self.name {
            return Err(CmdoError::InvalidArgument(format!(
                "argument `{name}` cannot depend on itself"
            )));
        }
        if self.dependencies.iter().any(|existing| existing == name) {
            return Err(CmdoError::InvalidArgument(format!(
                "dependency on `{name}` has already been declared"
            )));
        }
        self.dependencies.push(name.to_owned());
        Ok(self)
    }

    /// Makes the argument absorb every remaining token.
    ///
    /// # Errors
    ///
    /// Returns [`CmdoError::AlreadySet`] on a second call.
    pub fn catch_remaining(mut self) -> CmdoResult<Self> {
        if self.catch_remaining.is_some() {
            return Err(CmdoError::AlreadySet("catch remaining"));
        }
        self.catch_remaining = Some(true);
        Ok(self)
    }

    /// Switches suggestions for this argument on or off (on by default).
    ///
    /// # Errors
    ///
    /// Returns [`CmdoError::AlreadySet`] on a second call.
    pub fn show_tab_completion(mut self, active: bool) -> CmdoResult<Self> {
        if self.tab_completion.is_some() {
            return Err(CmdoError::AlreadySet("tab completion"));
        }
        self.tab_completion = Some(active);
        Ok(self)
    }

    /// Permission node required to use this argument.
    ///
    /// # Errors
    ///
    /// Fails on a second call or an empty node.
    pub fn requires_permission(mut self, node: impl Into<String>) -> CmdoResult<Self> {
        if self.permission.is_some() {
            return Err(CmdoError::AlreadySet("permission"));
        }
        let node = node.into();
        if node.is_empty() {
            return Err(CmdoError::InvalidArgument(
                "permission node must not be empty".to_owned(),
            ));
        }
        self.permission = Some(node);
        Ok(self)
    }

    /// Resolves the type and produces the immutable argument.
    ///
    /// # Errors
    ///
    /// Fails on an empty name, options that do not apply to the resolved type, a handler on a
    /// primitive or enumerable type, or when an enumerable type cannot build its capability.
    pub fn create(self) -> CmdoResult<ArgumentSpec> {
        if self.name.trim().is_empty() {
            return Err(CmdoError::InvalidArgument(
                "argument name must not be empty".to_owned(),
            ));
        }

        let kind = self.resolve_kind();
        let has_bounds = self.min.is_some() || self.max.is_some();
        let has_text_rules =
            self.min_length.is_some() || self.max_length.is_some() || self.pattern.is_some();

        if has_bounds && !kind.is_numeric() {
            return Err(CmdoError::InvalidArgument(format!(
                "`{}`: min and max only apply to integer and number arguments, not {}",
                self.name,
                kind.name()
            )));
        }
        if has_text_rules && kind != ArgumentType::String {
            return Err(CmdoError::InvalidArgument(format!(
                "`{}`: length and pattern only apply to string arguments, not {}",
                self.name,
                kind.name()
            )));
        }
        if self.handler.is_some() && kind.is_primitive() {
            return Err(CmdoError::InvalidArgument(format!(
                "`{}`: a {} argument cannot have a handler",
                self.name,
                kind.name()
            )));
        }
        if let ArgumentType::Enumerable(enumerable) = kind {
            if self.handler.is_some() {
                return Err(CmdoError::InvalidArgument(format!(
                    "`{}`: built-in type {} already provides a handler",
                    self.name,
                    enumerable.name()
                )));
            }
            enumerable.handler()?;
        }

        Ok(ArgumentSpec {
            name: self.name,
            kind,
            min: self.min.unwrap_or(f64::NEG_INFINITY),
            max: self.max.unwrap_or(f64::INFINITY),
            min_length: self.min_length.unwrap_or(1),
            max_length: self.max_length.unwrap_or(usize::MAX),
            pattern: self.pattern,
            handler: self.handler,
            defaults: self.defaults,
            dependencies: self.dependencies,
            catch_remaining: self.catch_remaining.unwrap_or(false),
            tab_completion: self.tab_completion.unwrap_or(true),
            permission: self.permission,
        })
    }

    fn resolve_kind(&self) -> ArgumentType {
        if let Some(kind) = self.kind {
            return kind;
        }
        if self.handler.is_some() {
            ArgumentType::Other
        } else if self.min.is_some() || self.max.is_some() {
            ArgumentType::Number
        } else {
            ArgumentType::String
        }
    }
}
