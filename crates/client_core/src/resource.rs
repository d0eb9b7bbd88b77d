use crate::error::ClientError;

/// Lifecycle of one screen's fetched data. `Failed` keeps the rendered
/// error message and stays put until the user asks for another load.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Resource<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Resource<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Resource::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Resource::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A [`Resource`] plus a load generation. Every `begin` invalidates the
/// tickets of earlier loads, so a response that raced a newer request
/// can never overwrite the newer outcome.
#[derive(Debug, Clone, Default)]
pub struct ResourceSlot<T> {
    state: Resource<T>,
    generation: u64,
}

impl<T> ResourceSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Resource::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &Resource<T> {
        &self.state
    }

    pub fn value(&self) -> Option<&T> {
        self.state.value()
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            Resource::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Marks the slot loading and returns the ticket the eventual
    /// completion must present.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = Resource::Loading;
        self.generation
    }

    /// Commits a successful load. Returns false (and changes nothing)
    /// when the ticket is stale.
    pub fn commit_ok(&mut self, ticket: u64, value: T) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.state = Resource::Loaded(value);
        true
    }

    /// Commits a failed load, keeping the message for the screen.
    pub fn commit_err(&mut self, ticket: u64, error: &ClientError) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.state = Resource::Failed(error.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_first_begin() {
        let slot: ResourceSlot<Vec<i64>> = ResourceSlot::new();
        assert_eq!(slot.state(), &Resource::Idle);
    }

    #[test]
    fn commit_with_current_ticket_lands() {
        let mut slot = ResourceSlot::new();
        let ticket = slot.begin();
        assert!(slot.state().is_loading());
        assert!(slot.commit_ok(ticket, vec![1, 2]));
        assert_eq!(slot.value(), Some(&vec![1, 2]));
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut slot = ResourceSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(slot.commit_ok(second, vec![9]));
        assert!(!slot.commit_ok(first, vec![1]));
        assert_eq!(slot.value(), Some(&vec![9]));
    }

    #[test]
    fn stale_failure_cannot_clobber_a_newer_success() {
        let mut slot = ResourceSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(slot.commit_ok(second, vec![9]));
        let err = ClientError::Http {
            status: 500,
            message: None,
        };
        assert!(!slot.commit_err(first, &err));
        assert_eq!(slot.value(), Some(&vec![9]));
    }

    #[test]
    fn failure_keeps_the_message() {
        let mut slot: ResourceSlot<Vec<i64>> = ResourceSlot::new();
        let ticket = slot.begin();
        let err = ClientError::Http {
            status: 503,
            message: Some("maintenance".to_string()),
        };
        assert!(slot.commit_err(ticket, &err));
        assert_eq!(slot.state().error(), Some("http status 503: maintenance"));
    }
}
