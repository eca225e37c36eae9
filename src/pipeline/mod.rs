//! Ordered guard chains that run before a handler touches a repository.
//!
//! A route is described by a [`Pipeline`]: a list of steps, each of which
//! either lets the request through or rejects it with a [`DomainError`]. The
//! first rejection ends the run and the handler never executes. Steps and the
//! handler share one [`Exchange`], which holds the locked repository, the
//! path id, the request's `data` object and the slot filled by
//! [`guards::exists`].

pub mod guards;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::{DomainError, Entity};
use crate::infrastructure::Collection;

pub type Step<T> = Box<dyn Fn(&mut Exchange<'_, T>) -> Result<(), DomainError> + Send + Sync>;

// ── Request context ──────────────────────────────────────────────────────────

pub struct Exchange<'r, T> {
    store: Collection<'r, T>,
    path_id: Option<String>,
    data: Map<String, Value>,
    found: Option<usize>,
}

impl<'r, T: Entity> Exchange<'r, T> {
    pub fn new(store: Collection<'r, T>, data: Map<String, Value>) -> Self {
        Self {
            store,
            path_id: None,
            data,
            found: None,
        }
    }

    pub fn with_path_id(mut self, id: impl Into<String>) -> Self {
        self.path_id = Some(id.into());
        self
    }

    pub fn path_id(&self) -> Option<&str> {
        self.path_id.as_deref()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Decodes the `data` object into a typed payload.
    pub fn decode<D: DeserializeOwned>(&self) -> Result<D, DomainError> {
        serde_json::from_value(Value::Object(self.data.clone())).map_err(|e| {
            DomainError::invalid(format!("Invalid {} data: {}", T::RESOURCE.to_lowercase(), e))
        })
    }

    pub fn store(&self) -> &Collection<'r, T> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Collection<'r, T> {
        &mut self.store
    }

    /// Records which stored entity this request is about.
    pub fn attach(&mut self, index: usize) {
        self.found = Some(index);
    }

    pub fn found(&self) -> Result<&T, DomainError> {
        let missing = self.missing();
        self.found
            .and_then(|index| self.store.get(index))
            .ok_or(missing)
    }

    pub fn found_mut(&mut self) -> Result<&mut T, DomainError> {
        let missing = self.missing();
        match self.found {
            Some(index) => self.store.get_mut(index).ok_or(missing),
            None => Err(missing),
        }
    }

    /// Removes the attached entity from the repository.
    pub fn remove_found(&mut self) -> Result<T, DomainError> {
        let missing = self.missing();
        let index = self.found.take().ok_or_else(|| missing.clone())?;
        self.store.remove_at(index).ok_or(missing)
    }

    fn missing(&self) -> DomainError {
        DomainError::NotFound {
            resource: T::RESOURCE,
            id: self.path_id.clone().unwrap_or_default(),
        }
    }
}

// ── Runner ────────────────────────────────────────────────────────────────────

pub struct Pipeline<T> {
    route: &'static str,
    steps: Vec<Step<T>>,
}

impl<T: Entity> Pipeline<T> {
    pub fn new(route: &'static str) -> Self {
        Self {
            route,
            steps: Vec::new(),
        }
    }

    pub fn guard<G>(mut self, step: G) -> Self
    where
        G: Fn(&mut Exchange<'_, T>) -> Result<(), DomainError> + Send + Sync + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Runs every step in order, then `handler` if none rejected the request.
    pub fn run<R, H>(&self, exchange: &mut Exchange<'_, T>, handler: H) -> Result<R, DomainError>
    where
        H: FnOnce(&mut Exchange<'_, T>) -> Result<R, DomainError>,
    {
        for (position, step) in self.steps.iter().enumerate() {
            if let Err(err) = step(&mut *exchange) {
                log::debug!("{} rejected at step {}: {}", self.route, position + 1, err);
                return Err(err);
            }
        }
        handler(exchange)
    }
}
