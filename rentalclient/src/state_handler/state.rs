use common::model::{NewRental, RentalConfirmation};
use common::{ApiCall, RemoteState, Tickets};
use log::{debug, error, info};

use super::page::{Effect, FormKind, PageState, NO_INVENTORY};
use super::{Action, Completion, Request, Route};
use crate::tui::TextType;

const MAX_HISTORY: usize = 32;

#[derive(Clone)]
pub struct ClientState {
    pub route: Route,
    pub history: Vec<Route>,
    pub page: PageState,
    pub api_url: String,
    pub per_page: usize,
    pub notifications: Vec<TextType>,
    pub exit: bool,
    tickets: Tickets,
}

impl Default for ClientState {
    fn default() -> ClientState {
        ClientState::new(String::from("http://localhost:5000"), 40)
    }
}

impl ClientState {
    pub fn new(api_url: String, per_page: usize) -> ClientState {
        let startup_notifications = vec![
            TextType::Notification {
                text: String::from("---- To quit press q or use /quit ----"),
            },
            TextType::Notification {
                text: format!("[*] Using rental API at {api_url}"),
            },
            TextType::Notification {
                text: String::from("[*] To see list of available commands use /help"),
            },
        ];

        ClientState {
            route: Route::Home,
            history: vec![],
            page: PageState::Menu,
            api_url,
            per_page,
            notifications: startup_notifications,
            exit: false,
            tickets: Tickets::default(),
        }
    }

    pub fn push_notification(&mut self, notification: TextType) {
        self.notifications.push(notification);
    }

    pub fn exit(&mut self) {
        self.exit = true;
    }

    fn display_help(&mut self) {
        self.push_notification(TextType::Notification {
            text: String::from("List of available commands:"),
        });

        let lines = [
            "    /go {path} - Open a page, ex. /go /displayFilmDetails/7",
            "    /home - Back to the home page",
            "    /back - Previous page",
            "    /reload - Fetch the current page again",
            "    /quit - Close the client",
            "    Keys: arrows move, Enter selects or submits, Tab switches field, Esc goes back",
        ];

        for line in lines {
            self.push_notification(TextType::Listing {
                text: String::from(line),
            });
        }
    }

    /// Replaces the current page with a fresh one for `route`. Going to the
    /// page on top of the back-stack pops it instead of pushing.
    pub fn navigate(&mut self, route: Route) -> Vec<Request> {
        if route != self.route {
            if self.history.last() == Some(&route) {
                self.history.pop();
            } else {
                let previous = std::mem::replace(&mut self.route, route.clone());
                self.history.push(previous);
                if self.history.len() > MAX_HISTORY {
                    self.history.remove(0);
                }
            }
        }

        self.mount(route)
    }

    fn mount(&mut self, route: Route) -> Vec<Request> {
        info!("[*] Opening {route}");

        self.route = route;
        self.page = PageState::for_route(&self.route);
        self.page.load(&mut self.tickets)
    }

    fn back(&mut self) -> Vec<Request> {
        match self.history.pop() {
            Some(route) => self.mount(route),
            None => vec![],
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Vec<Request> {
        match action {
            Action::Help => {
                self.display_help();
                vec![]
            }
            Action::Navigate { route } => self.navigate(route),
            Action::Back => self.back(),
            Action::Reload => self.page.load(&mut self.tickets),
            Action::Search { query } => match &mut self.page {
                PageState::FilmSearch(search) => vec![search.submit(query, &mut self.tickets)],
                PageState::CustomerSearch(search) => {
                    vec![search.submit(query, &mut self.tickets)]
                }
                _ => self.misplaced("search"),
            },
            Action::RentFilm {
                customer_id,
                staff_id,
            } => match &mut self.page {
                PageState::FilmDetails(page) => match page.inventory_id() {
                    Some(inventory_id) => {
                        let ticket = self.tickets.issue();
                        page.rental.begin(ticket);

                        let call = ApiCall::AddRental(NewRental {
                            inventory_id,
                            customer_id,
                            staff_id,
                        });
                        vec![Request { ticket, call }]
                    }
                    None => {
                        page.rental
                            .set(RemoteState::Failure(String::from(NO_INVENTORY)));
                        vec![]
                    }
                },
                _ => self.misplaced("rent"),
            },
            Action::ConfirmRental { full_name, film_id } => match &mut self.page {
                PageState::FilmDetails(page) => {
                    let ticket = self.tickets.issue();
                    page.confirmation.begin(ticket);

                    let call = ApiCall::ConfirmRental(RentalConfirmation {
                        full_name,
                        film_id: page.film_id,
                    });
                    vec![Request { ticket, call }]
                }
                PageState::ActorDetails(page) => {
                    let ticket = self.tickets.issue();
                    page.rental.begin(ticket);

                    let call = ApiCall::ConfirmRental(RentalConfirmation { full_name, film_id });
                    vec![Request { ticket, call }]
                }
                _ => self.misplaced("confirm rental"),
            },
            Action::AddCustomer { fields } => {
                self.submit_form(FormKind::AddCustomer, ApiCall::AddCustomer(fields))
            }
            Action::EditCustomer { id, fields } => match id.trim().is_empty() {
                true => vec![],
                false => self.submit_form(
                    FormKind::EditCustomer,
                    ApiCall::EditCustomer {
                        id: id.trim().to_string(),
                        fields,
                    },
                ),
            },
            Action::DeleteCustomer { id } => match id.trim().is_empty() {
                true => vec![],
                false => self.submit_form(
                    FormKind::DeleteCustomer,
                    ApiCall::DeleteCustomer(id.trim().to_string()),
                ),
            },
            Action::ReturnMovie { rental_id } => {
                let rental_id = rental_id.trim().to_string();
                if rental_id.is_empty() {
                    return vec![];
                }

                match &mut self.page {
                    PageState::CustomerDetails(page) => {
                        let ticket = self.tickets.issue();
                        page.returned.begin(ticket);

                        vec![Request {
                            ticket,
                            call: ApiCall::ReturnMovie(rental_id),
                        }]
                    }
                    _ => self.submit_form(FormKind::ReturnMovie, ApiCall::ReturnMovie(rental_id)),
                }
            }
            Action::Quit => {
                self.exit();
                vec![]
            }
            Action::Invalid => {
                self.push_notification(TextType::Error {
                    text: String::from("[-] Invalid command"),
                });
                vec![]
            }
        }
    }

    fn submit_form(&mut self, kind: FormKind, call: ApiCall) -> Vec<Request> {
        match &mut self.page {
            PageState::Form(form) if form.kind == kind => {
                vec![form.submit(call, &mut self.tickets)]
            }
            _ => self.misplaced("submit"),
        }
    }

    fn misplaced(&mut self, what: &str) -> Vec<Request> {
        debug!("[-] Ignoring {what} on {}", self.route);
        self.push_notification(TextType::Error {
            text: format!("[-] Cannot {what} from this page"),
        });

        vec![]
    }

    /// Applies a finished call to the current page. Completions for requests
    /// that were superseded, or that belong to a page no longer shown, are
    /// dropped.
    pub fn complete(&mut self, completion: Completion) -> Vec<Request> {
        let Completion { ticket, result } = completion;

        match self.page.complete(ticket, result) {
            Effect::Stale => {
                debug!("[*] Dropping stale response #{}", ticket.id());
                vec![]
            }
            Effect::Settled => vec![],
            Effect::Failed(reason) => {
                error!("[-] Loading {} failed: {reason}", self.route);
                self.push_notification(TextType::Error {
                    text: format!("[-] {reason}"),
                });
                vec![]
            }
            Effect::Navigate(route) => self.navigate(route),
            Effect::Refresh => self.page.load(&mut self.tickets),
        }
    }
}
