//! The evaluation model: variable scoping, repetitions, recorded errors.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use petal_value::{TraversableValue, Value, ValueMap};
use rustc_hash::FxHashMap;

use crate::registry::EvaluatorRegistry;
use crate::repetition::RepetitionInfo;

/// A single-threaded shared-state wrapper.
///
/// Wraps `Rc<RefCell<T>>` behind a factory constructor so that every piece
/// of state shared between scopes is allocated the same way. Not `Send`:
/// the engine is single-threaded.
#[repr(transparent)]
pub struct SharedScope<T>(Rc<RefCell<T>>);

impl<T> SharedScope<T> {
    /// Create a new shared slot holding `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        SharedScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for SharedScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        SharedScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for SharedScope<T> {
    fn default() -> Self {
        SharedScope::new(T::default())
    }
}

impl<T> Deref for SharedScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A snapshot of an error recovered by an on-error directive.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RecordedError {
    /// Rendered description of the failure.
    pub message: String,
    /// Name of the element whose on-error directive accepted the failure.
    pub element: String,
}

/// Mutable per-subtree evaluation state.
///
/// A child model copies local bindings by value and shares the global map
/// (and the error list) by reference: a global write is visible to every
/// model created before or after the write, while a local write is visible
/// only within the defining model and children created after it.
#[derive(Clone, Debug)]
pub struct EvaluationModel {
    locals: FxHashMap<String, Value>,
    globals: SharedScope<FxHashMap<String, Value>>,
    repetitions: FxHashMap<String, Rc<RepetitionInfo>>,
    errors: SharedScope<Vec<RecordedError>>,
    here: Value,
    options: Rc<ValueMap>,
    registry: Rc<EvaluatorRegistry>,
}

impl EvaluationModel {
    /// A root model over `here`, with the standard evaluators.
    pub fn new(here: Value) -> Self {
        Self::with_registry(here, Rc::new(EvaluatorRegistry::with_defaults()))
    }

    /// A root model over `here` with a caller-built registry.
    pub fn with_registry(here: Value, registry: Rc<EvaluatorRegistry>) -> Self {
        EvaluationModel {
            locals: FxHashMap::default(),
            globals: SharedScope::default(),
            repetitions: FxHashMap::default(),
            errors: SharedScope::default(),
            here,
            options: Rc::new(ValueMap::default()),
            registry,
        }
    }

    /// Replace the keyword options exposed through the `options` root.
    pub fn set_options(&mut self, options: ValueMap) {
        self.options = Rc::new(options);
    }

    /// Create a child scope: locals and repetitions copied by value,
    /// globals and the error list shared by reference.
    pub fn create_child(&self) -> Self {
        EvaluationModel {
            locals: self.locals.clone(),
            globals: self.globals.clone(),
            repetitions: self.repetitions.clone(),
            errors: self.errors.clone(),
            here: self.here.clone(),
            options: Rc::clone(&self.options),
            registry: Rc::clone(&self.registry),
        }
    }

    // Variables

    /// Bind a local variable, shadowing any global of the same name.
    pub fn define_local(&mut self, name: impl Into<String>, value: Value) {
        self.locals.insert(name.into(), value);
    }

    /// Bind a global variable, visible to every scope sharing this model's
    /// global map.
    pub fn define_global(&mut self, name: impl Into<String>, value: Value) {
        self.globals.borrow_mut().insert(name.into(), value);
    }

    /// Look up a user-defined variable: locals shadow globals.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.locals.get(name) {
            return Some(value.clone());
        }
        self.globals.borrow().get(name).cloned()
    }

    /// Number of local bindings. Test support.
    pub fn local_count(&self) -> usize {
        self.locals.len()
    }

    /// Number of global bindings. Test support.
    pub fn global_count(&self) -> usize {
        self.globals.borrow().len()
    }

    // Built-in roots

    /// The root model object (the `here` root).
    pub fn here(&self) -> &Value {
        &self.here
    }

    /// The keyword options (the `options` root).
    pub fn options(&self) -> Rc<ValueMap> {
        Rc::clone(&self.options)
    }

    /// The registry evaluators dispatch through.
    pub fn registry(&self) -> &Rc<EvaluatorRegistry> {
        &self.registry
    }

    // Repetitions

    /// Make a repetition visible under its name (the `repeat` root).
    pub fn set_repetition(&mut self, info: Rc<RepetitionInfo>) {
        self.repetitions.insert(info.name.clone(), info);
    }

    /// The active repetition with the given name.
    pub fn repetition(&self, name: &str) -> Option<&Rc<RepetitionInfo>> {
        self.repetitions.get(name)
    }

    /// The `repeat` container value: repetition name -> descriptor view.
    pub fn repeat_container(&self) -> Value {
        let mut entries = ValueMap::default();
        for (name, info) in &self.repetitions {
            let view: Rc<dyn TraversableValue> = info.clone();
            entries.insert(name.clone(), Value::object(view));
        }
        Value::map(entries)
    }

    // Errors

    /// Append a recovered error to the shared error list.
    pub fn record_error(&self, error: RecordedError) {
        self.errors.borrow_mut().push(error);
    }

    /// Snapshot of the recorded errors.
    pub fn recorded_errors(&self) -> Vec<RecordedError> {
        self.errors.borrow().clone()
    }
}
