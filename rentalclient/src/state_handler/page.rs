use common::model::{ActorFilm, ActorSummary, Customer, CustomerRental, FilmDetails, FilmSummary};
use common::{classify, ApiCall, ApiError, ErrorCopy, Remote, RemoteState, Reply, Ticket, Tickets};

use super::{Request, Route};

const LOAD_COPY: ErrorCopy = ErrorCopy::generic("An error occurred while fetching data.");
const RENT_COPY: ErrorCopy = ErrorCopy::generic("An error occurred while renting the film.");
const CONFIRM_COPY: ErrorCopy =
    ErrorCopy::generic("An error occurred while confirming the rental.");

pub const NO_INVENTORY: &str = "No inventory copy is available to rent for this film.";

/// What the state handler must do after a completion reached the page
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// The completion belonged to an older request and was dropped
    Stale,
    Settled,
    Failed(String),
    Navigate(Route),
    /// A mutation succeeded and the page's record must be fetched again
    Refresh,
}

/// Decodes `result` into `slot` if `ticket` is the slot's latest request.
/// `None` means the ticket was stale.
fn settle<T>(
    slot: &mut Remote<T>,
    ticket: Ticket,
    result: Result<Reply, ApiError>,
    copy: &ErrorCopy,
) -> Option<Result<(), String>>
where
    T: TryFrom<Reply, Error = ApiError>,
{
    if !slot.owns(ticket) {
        return None;
    }

    let outcome = result
        .and_then(T::try_from)
        .map_err(|e| classify(&e, copy));
    let settled = outcome.as_ref().map(|_| ()).map_err(|reason| reason.clone());
    slot.resolve(ticket, outcome);

    Some(settled)
}

fn fetched(settled: Option<Result<(), String>>) -> Effect {
    match settled {
        None => Effect::Stale,
        Some(Ok(())) => Effect::Settled,
        Some(Err(reason)) => Effect::Failed(reason),
    }
}

fn mutated(settled: Option<Result<(), String>>) -> Effect {
    match settled {
        None => Effect::Stale,
        Some(Ok(())) => Effect::Refresh,
        Some(Err(_)) => Effect::Settled,
    }
}

fn request(slot: &mut Remote<impl Sized>, tickets: &mut Tickets, call: ApiCall) -> Request {
    let ticket = tickets.issue();
    slot.begin(ticket);

    Request { ticket, call }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SearchKind {
    Title,
    Category,
    Actor,
    Customer,
}

impl SearchKind {
    fn call(&self, query: String) -> ApiCall {
        match self {
            SearchKind::Title => ApiCall::SearchByTitle(query),
            SearchKind::Category => ApiCall::SearchByCategory(query),
            SearchKind::Actor => ApiCall::SearchByActor(query),
            SearchKind::Customer => ApiCall::SearchCustomer(query),
        }
    }

    pub fn not_found(&self) -> &'static str {
        match self {
            SearchKind::Title => "Sorry, that movie was not found. Try a different movie",
            SearchKind::Category => {
                "Sorry, that film category was not found. Try a different category"
            }
            SearchKind::Actor => "Sorry, no films found for that actor. Try a different name.",
            SearchKind::Customer => {
                "Sorry, no customers matched that search. Try a different ID or name."
            }
        }
    }

    fn copy(&self) -> ErrorCopy {
        match self {
            SearchKind::Title | SearchKind::Category => {
                ErrorCopy::generic("An error occurred while searching for the movie.")
            }
            SearchKind::Actor => {
                ErrorCopy::generic("An error occurred while searching for the movies.")
            }
            SearchKind::Customer => {
                ErrorCopy::generic("An error occurred while searching for customers.")
            }
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            SearchKind::Title => "Enter film name",
            SearchKind::Category => "Enter category",
            SearchKind::Actor => "Enter actor",
            SearchKind::Customer => "Enter customer ID or name",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchState<T> {
    pub kind: SearchKind,
    pub query: String,
    pub results: Remote<Vec<T>>,
}

impl<T> SearchState<T>
where
    Vec<T>: TryFrom<Reply, Error = ApiError>,
{
    pub fn new(kind: SearchKind) -> Self {
        Self {
            kind,
            query: String::new(),
            results: Remote::default(),
        }
    }

    pub fn submit(&mut self, query: String, tickets: &mut Tickets) -> Request {
        self.query = query.clone();
        let call = self.kind.call(query);

        request(&mut self.results, tickets, call)
    }

    /// Empty result sets become the page's not-found message. Title searches
    /// jump straight to the first match, which `first_route` extracts.
    fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<Reply, ApiError>,
        first_route: impl Fn(&T) -> Option<Route>,
    ) -> Effect {
        if !self.results.owns(ticket) {
            return Effect::Stale;
        }

        let outcome = match result.and_then(Vec::<T>::try_from) {
            Ok(found) if found.is_empty() => Err(self.kind.not_found().to_string()),
            Ok(found) => Ok(found),
            Err(e) => Err(classify(&e, &self.kind.copy())),
        };

        let effect = match &outcome {
            Ok(found) => match found.first().and_then(&first_route) {
                Some(route) => Effect::Navigate(route),
                None => Effect::Settled,
            },
            Err(_) => Effect::Settled,
        };
        self.results.resolve(ticket, outcome);

        effect
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilmDetailsState {
    pub film_id: u32,
    pub details: Remote<Vec<FilmDetails>>,
    pub rental: Remote<String>,
    pub confirmation: Remote<String>,
}

impl FilmDetailsState {
    pub fn inventory_id(&self) -> Option<u32> {
        self.details
            .data()
            .and_then(|details| details.iter().find_map(|d| d.inventory_id))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActorDetailsState {
    pub actor_id: u32,
    pub films: Remote<Vec<ActorFilm>>,
    pub rental: Remote<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CustomerDetailsState {
    pub customer_id: u32,
    pub rentals: Remote<Vec<CustomerRental>>,
    pub returned: Remote<String>,
}

impl CustomerDetailsState {
    pub const RETURN_COPY: ErrorCopy = FormKind::ReturnMovie.copy();
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormKind {
    AddCustomer,
    EditCustomer,
    DeleteCustomer,
    ReturnMovie,
}

impl FormKind {
    pub const fn copy(&self) -> ErrorCopy {
        match self {
            FormKind::AddCustomer => {
                ErrorCopy::generic("An error occurred while adding the customer.")
            }
            FormKind::EditCustomer => ErrorCopy::with_not_found(
                "There is no customer with that ID.",
                "An error occurred while updating the customer.",
            ),
            FormKind::DeleteCustomer => ErrorCopy::with_not_found(
                "There is no customer with that ID.",
                "An error occurred while deleting the customer.",
            ),
            FormKind::ReturnMovie => ErrorCopy::with_not_found(
                "There is no rental with that ID.",
                "An error occurred while returning the movie.",
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub kind: FormKind,
    pub prefill: Option<u32>,
    pub result: Remote<String>,
}

impl FormState {
    pub fn submit(&mut self, call: ApiCall, tickets: &mut Tickets) -> Request {
        request(&mut self.result, tickets, call)
    }
}

/// View state of the page currently shown
#[derive(Clone, Debug, PartialEq)]
pub enum PageState {
    Menu,
    TopFilms(Remote<Vec<FilmSummary>>),
    TopActors(Remote<Vec<ActorSummary>>),
    FilmSearch(SearchState<FilmSummary>),
    CustomerSearch(SearchState<Customer>),
    FilmDetails(FilmDetailsState),
    ActorDetails(ActorDetailsState),
    Customers(Remote<Vec<Customer>>),
    CustomerDetails(CustomerDetailsState),
    Form(FormState),
}

impl PageState {
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Home | Route::FilmSearch => PageState::Menu,
            Route::FiveMovies => PageState::TopFilms(Remote::default()),
            Route::FiveActors => PageState::TopActors(Remote::default()),
            Route::SearchFilmName => PageState::FilmSearch(SearchState::new(SearchKind::Title)),
            Route::SearchFilmGenre => {
                PageState::FilmSearch(SearchState::new(SearchKind::Category))
            }
            Route::SearchFilmActor => PageState::FilmSearch(SearchState::new(SearchKind::Actor)),
            Route::SearchCustomer => {
                PageState::CustomerSearch(SearchState::new(SearchKind::Customer))
            }
            Route::FilmDetails(film_id) => PageState::FilmDetails(FilmDetailsState {
                film_id: *film_id,
                details: Remote::default(),
                rental: Remote::default(),
                confirmation: Remote::default(),
            }),
            Route::ActorDetails(actor_id) => PageState::ActorDetails(ActorDetailsState {
                actor_id: *actor_id,
                films: Remote::default(),
                rental: Remote::default(),
            }),
            Route::ViewCustomers => PageState::Customers(Remote::default()),
            Route::CustomerDetails(customer_id) => {
                PageState::CustomerDetails(CustomerDetailsState {
                    customer_id: *customer_id,
                    rentals: Remote::default(),
                    returned: Remote::default(),
                })
            }
            Route::AddCustomer => PageState::form(FormKind::AddCustomer, None),
            Route::EditCustomer(id) => PageState::form(FormKind::EditCustomer, *id),
            Route::DeleteCustomer(id) => PageState::form(FormKind::DeleteCustomer, *id),
            Route::ReturnMovie => PageState::form(FormKind::ReturnMovie, None),
        }
    }

    fn form(kind: FormKind, prefill: Option<u32>) -> Self {
        PageState::Form(FormState {
            kind,
            prefill,
            result: Remote::default(),
        })
    }

    /// Issues the page's fetch, for pages bound to a read endpoint
    pub fn load(&mut self, tickets: &mut Tickets) -> Vec<Request> {
        let request = match self {
            PageState::TopFilms(films) => request(films, tickets, ApiCall::TopFiveFilms),
            PageState::TopActors(actors) => request(actors, tickets, ApiCall::TopFiveActors),
            PageState::FilmDetails(page) => request(
                &mut page.details,
                tickets,
                ApiCall::FilmDetails(page.film_id),
            ),
            PageState::ActorDetails(page) => request(
                &mut page.films,
                tickets,
                ApiCall::ActorDetails(page.actor_id),
            ),
            PageState::Customers(customers) => {
                request(customers, tickets, ApiCall::ViewCustomers)
            }
            PageState::CustomerDetails(page) => request(
                &mut page.rentals,
                tickets,
                ApiCall::CustomerDetails(page.customer_id),
            ),
            PageState::Menu
            | PageState::FilmSearch(_)
            | PageState::CustomerSearch(_)
            | PageState::Form(_) => return vec![],
        };

        vec![request]
    }

    pub fn complete(&mut self, ticket: Ticket, result: Result<Reply, ApiError>) -> Effect {
        match self {
            PageState::Menu => Effect::Stale,
            PageState::TopFilms(films) => fetched(settle(films, ticket, result, &LOAD_COPY)),
            PageState::TopActors(actors) => fetched(settle(actors, ticket, result, &LOAD_COPY)),
            PageState::Customers(customers) => {
                fetched(settle(customers, ticket, result, &LOAD_COPY))
            }
            PageState::FilmSearch(search) => {
                let jumps = search.kind == SearchKind::Title;
                search.complete(ticket, result, |film| {
                    jumps.then(|| Route::FilmDetails(film.film_id))
                })
            }
            PageState::CustomerSearch(search) => search.complete(ticket, result, |_| None),
            PageState::FilmDetails(page) => {
                if page.details.owns(ticket) {
                    fetched(settle(&mut page.details, ticket, result, &LOAD_COPY))
                } else if page.rental.owns(ticket) {
                    mutated(settle(&mut page.rental, ticket, result, &RENT_COPY))
                } else {
                    mutated(settle(&mut page.confirmation, ticket, result, &CONFIRM_COPY))
                }
            }
            PageState::ActorDetails(page) => match page.films.owns(ticket) {
                true => fetched(settle(&mut page.films, ticket, result, &LOAD_COPY)),
                false => mutated(settle(&mut page.rental, ticket, result, &CONFIRM_COPY)),
            },
            PageState::CustomerDetails(page) => match page.rentals.owns(ticket) {
                true => fetched(settle(&mut page.rentals, ticket, result, &LOAD_COPY)),
                false => mutated(settle(
                    &mut page.returned,
                    ticket,
                    result,
                    &CustomerDetailsState::RETURN_COPY,
                )),
            },
            PageState::Form(form) => {
                let copy = form.kind.copy();
                match settle(&mut form.result, ticket, result, &copy) {
                    None => Effect::Stale,
                    Some(_) => Effect::Settled,
                }
            }
        }
    }
}

/// Records shown on one page of a paginated list. Pages are 1-based and
/// out-of-range pages clamp to the last one.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if items.is_empty() || per_page == 0 {
        return &[];
    }

    let page = page.clamp(1, page_count(items.len(), per_page));
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());

    &items[start..end]
}

pub fn page_count(len: usize, per_page: usize) -> usize {
    match per_page {
        0 => 0,
        _ => len.div_ceil(per_page),
    }
}

impl<T> SearchState<T> {
    pub fn error_message(&self) -> Option<&str> {
        match self.results.state() {
            RemoteState::Failure(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(film_id: u32, title: &str) -> FilmSummary {
        FilmSummary {
            film_id,
            title: title.to_string(),
            category_name: None,
            category_id: None,
            rental_count: None,
        }
    }

    #[test]
    fn title_search_jumps_to_first_match() {
        let mut tickets = Tickets::default();
        let mut page = PageState::for_route(&Route::SearchFilmName);
        let PageState::FilmSearch(search) = &mut page else {
            panic!("expected a search page");
        };
        let request = search.submit(String::from("matrix"), &mut tickets);
        assert_eq!(request.call, ApiCall::SearchByTitle(String::from("matrix")));

        let effect = page.complete(
            request.ticket,
            Ok(Reply::Films(vec![film(7, "The Matrix"), film(8, "Matrix II")])),
        );

        assert_eq!(effect, Effect::Navigate(Route::FilmDetails(7)));
    }

    #[test]
    fn genre_search_lists_results() {
        let mut tickets = Tickets::default();
        let mut page = PageState::for_route(&Route::SearchFilmGenre);
        let PageState::FilmSearch(search) = &mut page else {
            panic!("expected a search page");
        };
        let request = search.submit(String::from("Horror"), &mut tickets);

        let effect = page.complete(
            request.ticket,
            Ok(Reply::Films(vec![film(1, "A"), film(2, "B")])),
        );

        assert_eq!(effect, Effect::Settled);
        let PageState::FilmSearch(search) = &page else {
            panic!("expected a search page");
        };
        assert_eq!(search.results.data().map(Vec::len), Some(2));
        assert_eq!(search.error_message(), None);
    }

    #[test]
    fn empty_search_shows_not_found() {
        for route in [
            Route::SearchFilmName,
            Route::SearchFilmGenre,
            Route::SearchFilmActor,
        ] {
            let mut tickets = Tickets::default();
            let mut page = PageState::for_route(&route);
            let PageState::FilmSearch(search) = &mut page else {
                panic!("expected a search page");
            };
            let kind = search.kind;
            let request = search.submit(String::from("zzz"), &mut tickets);

            let effect = page.complete(request.ticket, Ok(Reply::Films(vec![])));

            assert_eq!(effect, Effect::Settled);
            let PageState::FilmSearch(search) = &page else {
                panic!("expected a search page");
            };
            assert_eq!(search.error_message(), Some(kind.not_found()));
        }
    }

    #[test]
    fn search_transport_failure_is_generic() {
        let mut tickets = Tickets::default();
        let mut search: SearchState<FilmSummary> = SearchState::new(SearchKind::Actor);
        let request = search.submit(String::from("penelope"), &mut tickets);

        search.complete(
            request.ticket,
            Err(ApiError::Transport(String::from("refused"))),
            |_| None,
        );

        assert_eq!(
            search.error_message(),
            Some("An error occurred while searching for the movies.")
        );
    }

    #[test]
    fn double_submit_keeps_latest() {
        let mut tickets = Tickets::default();
        let mut search: SearchState<FilmSummary> = SearchState::new(SearchKind::Category);
        let first = search.submit(String::from("Horror"), &mut tickets);
        let second = search.submit(String::from("Comedy"), &mut tickets);

        let effect = search.complete(second.ticket, Ok(Reply::Films(vec![film(2, "B")])), |_| None);
        assert_eq!(effect, Effect::Settled);
        let effect = search.complete(first.ticket, Ok(Reply::Films(vec![film(1, "A")])), |_| None);
        assert_eq!(effect, Effect::Stale);

        assert_eq!(search.results.data(), Some(&vec![film(2, "B")]));
        assert_eq!(search.query, "Comedy");
    }

    #[test]
    fn mutation_success_refreshes_details() {
        let mut tickets = Tickets::default();
        let mut page = PageState::for_route(&Route::CustomerDetails(1));
        page.load(&mut tickets);

        let PageState::CustomerDetails(details) = &mut page else {
            panic!("expected customer details");
        };
        let ticket = tickets.issue();
        details.returned.begin(ticket);

        let effect = page.complete(ticket, Ok(Reply::Message(String::from("Returned"))));
        assert_eq!(effect, Effect::Refresh);
    }

    #[test]
    fn list_failure_is_reported() {
        let mut tickets = Tickets::default();
        let mut page = PageState::for_route(&Route::FiveMovies);
        let requests = page.load(&mut tickets);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].call, ApiCall::TopFiveFilms);

        let effect = page.complete(
            requests[0].ticket,
            Err(ApiError::Status {
                status: 500,
                message: None,
            }),
        );

        assert_eq!(
            effect,
            Effect::Failed(String::from("An error occurred while fetching data."))
        );
    }

    #[test]
    fn pagination_slices() {
        let items: Vec<u32> = (1..=85).collect();

        assert_eq!(page_count(items.len(), 40), 3);
        assert_eq!(paginate(&items, 1, 40), &items[0..40]);
        assert_eq!(paginate(&items, 3, 40), &items[80..85]);
        assert_eq!(paginate(&items, 9, 40), &items[80..85]);
        assert_eq!(paginate(&items, 0, 40), &items[0..40]);
        assert!(paginate::<u32>(&[], 1, 40).is_empty());
        assert_eq!(page_count(0, 40), 0);
    }
}
