mod action;
mod page;
mod route;
mod state;

pub use action::{parse_command, Action};
pub use page::{page_count, paginate, FormKind, PageState, SearchKind};
pub use route::Route;
pub use state::ClientState;

use common::{ApiCall, ApiError, Reply, Ticket};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// An API call the state handler must run on behalf of a page
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub ticket: Ticket,
    pub call: ApiCall,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub ticket: Ticket,
    pub result: Result<Reply, ApiError>,
}

pub struct StateHandler {
    pub state_tx: UnboundedSender<ClientState>,
}

impl StateHandler {
    pub fn new() -> (Self, UnboundedReceiver<ClientState>) {
        let (state_tx, state_rx) = mpsc::unbounded_channel::<ClientState>();

        (Self { state_tx }, state_rx)
    }

    pub fn send_update(&self, state: ClientState) {
        let _ = self.state_tx.send(state);
    }
}
