//! Reactive binding: class state held in a host-provided cell.
//!
//! A host (a UI framework, an observable, a test harness) supplies anything
//! implementing [`StateCell`]. [`LocalCell`] is the built-in single-threaded
//! implementation with change callbacks.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use classet_model::{Label, LabelSet, Result, Schema, SpecOptions, UpdateInstruction};
use tracing::debug;

use crate::reduce::update;
use crate::serialize::serialize;
use crate::set_ops::union;
use crate::spec::Spec;

/// Storage for one binding's state.
///
/// `set` replaces the value wholesale and is expected to notify whatever
/// depends on it.
pub trait StateCell<T> {
    fn get(&self) -> T;
    fn set(&self, next: T);
}

pub type SubscriptionId = u64;

type Subscriber<T> = Box<dyn Fn(&T)>;

struct CellInner<T> {
    value: RefCell<T>,
    subscribers: RefCell<BTreeMap<SubscriptionId, Subscriber<T>>>,
    next_id: Cell<SubscriptionId>,
}

/// A single-threaded observable cell.
///
/// Clones share the same value and subscribers.
pub struct LocalCell<T> {
    inner: Rc<CellInner<T>>,
}

impl<T> LocalCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(CellInner {
                value: RefCell::new(value),
                subscribers: RefCell::new(BTreeMap::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Register `callback` to run with the new value after every `set`.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a subscriber callback.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .insert(id, Box::new(callback));
        id
    }

    /// Returns false if `id` was not subscribed.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a subscriber callback.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.borrow_mut().remove(&id).is_some()
    }
}

impl<T> Clone for LocalCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalCell")
            .field("value", &self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

impl<T: Clone> StateCell<T> for LocalCell<T> {
    fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    fn set(&self, next: T) {
        *self.inner.value.borrow_mut() = next;
        let published = self.get();
        for callback in self.inner.subscribers.borrow().values() {
            callback(&published);
        }
    }
}

/// Read/update handle over one binding's state.
pub struct Classes<C = LocalCell<LabelSet>> {
    spec: Option<Arc<Spec>>,
    cell: C,
}

impl<C: StateCell<LabelSet>> Classes<C> {
    /// The current state.
    pub fn classes(&self) -> LabelSet {
        self.cell.get()
    }

    /// Apply one batch of instructions and publish the result.
    ///
    /// On error nothing is published and the state stays as it was.
    pub fn set_classes<I>(&self, instructions: I) -> Result<()>
    where
        I: IntoIterator<Item = UpdateInstruction>,
    {
        let current = self.cell.get();
        let next = update(
            self.spec.as_deref(),
            &current,
            instructions.into_iter().collect(),
        )?;
        self.cell.set(next);
        Ok(())
    }

    /// Serialize the current state with this handle's spec.
    pub fn serialize(&self) -> String {
        serialize(self.spec.as_deref(), &self.cell.get())
    }

    pub fn spec(&self) -> Option<&Spec> {
        self.spec.as_deref()
    }

    pub fn cell(&self) -> &C {
        &self.cell
    }
}

impl<C: fmt::Debug> fmt::Debug for Classes<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classes")
            .field("schema_bound", &self.spec.is_some())
            .field("cell", &self.cell)
            .finish()
    }
}

/// A spec built once and shared by every handle it hands out.
#[derive(Debug, Clone)]
pub struct Binder {
    spec: Arc<Spec>,
}

impl Binder {
    pub fn new(schema: &Schema) -> Self {
        Self::from_spec(Spec::new(schema))
    }

    pub fn with_options(schema: &Schema, options: &SpecOptions) -> Result<Self> {
        Ok(Self::from_spec(Spec::with_options(schema, options)?))
    }

    pub fn from_spec(spec: Spec) -> Self {
        Self {
            spec: Arc::new(spec),
        }
    }

    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    /// Acquire a handle seeded with `initial` plus the schema defaults.
    ///
    /// Fails with `ClassError::UnknownLabel` if any initial label is undeclared.
    pub fn acquire<I, S>(&self, initial: I) -> Result<Classes>
    where
        I: IntoIterator<Item = S>,
        S: Into<Label>,
    {
        self.acquire_with(initial, LocalCell::new)
    }

    /// Acquire a handle seeded with only the schema defaults.
    pub fn acquire_defaults(&self) -> Classes {
        self.seeded(LabelSet::new(), LocalCell::new)
    }

    /// Acquire a handle whose state lives in a cell built by `make_cell`.
    pub fn acquire_with<I, S, C, F>(&self, initial: I, make_cell: F) -> Result<Classes<C>>
    where
        I: IntoIterator<Item = S>,
        S: Into<Label>,
        F: FnOnce(LabelSet) -> C,
    {
        let initial: LabelSet = initial.into_iter().map(Into::into).collect();
        self.spec.validate(&initial)?;
        Ok(self.seeded(initial, make_cell))
    }

    fn seeded<C, F>(&self, initial: LabelSet, make_cell: F) -> Classes<C>
    where
        F: FnOnce(LabelSet) -> C,
    {
        let seed = union(&initial, self.spec.default_labels());
        debug!(
            initial = initial.len(),
            defaults = self.spec.default_labels().len(),
            "acquired class binding"
        );
        Classes {
            spec: Some(Arc::clone(&self.spec)),
            cell: make_cell(seed),
        }
    }

    pub fn serialize(&self, state: &LabelSet) -> String {
        serialize(Some(&*self.spec), state)
    }
}

/// Build a spec from `schema` and return the bound `acquire`/`serialize` pair.
pub fn bind(schema: &Schema) -> Binder {
    Binder::new(schema)
}

/// Acquire a schema-less handle: no validation, defaults, or exclusive groups.
pub fn acquire<I, S>(initial: I) -> Classes
where
    I: IntoIterator<Item = S>,
    S: Into<Label>,
{
    acquire_with(initial, LocalCell::new)
}

/// Schema-less [`acquire`] over a host-provided cell.
pub fn acquire_with<I, S, C, F>(initial: I, make_cell: F) -> Classes<C>
where
    I: IntoIterator<Item = S>,
    S: Into<Label>,
    F: FnOnce(LabelSet) -> C,
{
    let seed: LabelSet = initial.into_iter().map(Into::into).collect();
    debug!(initial = seed.len(), "acquired schema-less class binding");
    Classes {
        spec: None,
        cell: make_cell(seed),
    }
}
