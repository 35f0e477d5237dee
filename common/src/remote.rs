//! Tagged per-request view state shared by every page, plus the tickets used
//! to tell the latest request apart from stale ones.

/// Identifies one issued request. Tickets are unique for the lifetime of a
/// [`Tickets`] source, so a completion can never be confused with a request
/// issued by another page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct Tickets {
    next: u64,
}

impl Tickets {
    pub fn issue(&mut self) -> Ticket {
        self.next += 1;
        Ticket(self.next)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RemoteState<T> {
    Idle,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> Default for RemoteState<T> {
    fn default() -> Self {
        RemoteState::Idle
    }
}

impl<T> RemoteState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RemoteState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RemoteState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            RemoteState::Failure(reason) => Some(reason),
            _ => None,
        }
    }
}

/// A slot of remote data owned by a page
#[derive(Clone, Debug, PartialEq)]
pub struct Remote<T> {
    state: RemoteState<T>,
    pending: Option<Ticket>,
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self {
            state: RemoteState::Idle,
            pending: None,
        }
    }
}

impl<T> Remote<T> {
    pub fn state(&self) -> &RemoteState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data()
    }

    /// Marks the slot as loading on behalf of `ticket`. Any earlier request
    /// still in flight becomes stale.
    pub fn begin(&mut self, ticket: Ticket) {
        self.pending = Some(ticket);
        self.state = RemoteState::Loading;
    }

    pub fn owns(&self, ticket: Ticket) -> bool {
        self.pending == Some(ticket)
    }

    /// Settles the slot if `ticket` is the latest request. Returns false and
    /// leaves the slot untouched for stale tickets.
    pub fn resolve(&mut self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        if !self.owns(ticket) {
            return false;
        }

        self.pending = None;
        self.state = match outcome {
            Ok(data) => RemoteState::Success(data),
            Err(reason) => RemoteState::Failure(reason),
        };

        true
    }

    /// Overwrites the slot without a request, e.g. for a failure detected
    /// before anything was sent. Pending requests become stale.
    pub fn set(&mut self, state: RemoteState<T>) {
        self.pending = None;
        self.state = state;
    }
}
