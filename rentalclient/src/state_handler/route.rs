use std::fmt;

/// Every page the client can show, addressed by a URL-like path
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    FiveMovies,
    FiveActors,
    FilmSearch,
    SearchFilmName,
    SearchFilmGenre,
    SearchFilmActor,
    FilmDetails(u32),
    ActorDetails(u32),
    ViewCustomers,
    SearchCustomer,
    CustomerDetails(u32),
    AddCustomer,
    EditCustomer(Option<u32>),
    DeleteCustomer(Option<u32>),
    ReturnMovie,
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim();
        let mut segments = path.trim_matches('/').split('/');
        let head = segments.next().unwrap_or_default();
        let id = segments.next();

        if segments.next().is_some() {
            return None;
        }

        let parse_id = |id: Option<&str>| id.and_then(|id| id.parse::<u32>().ok());

        let route = match (head, id) {
            ("", None) => Route::Home,
            ("FiveMovies", None) => Route::FiveMovies,
            ("FiveActors", None) => Route::FiveActors,
            ("FilmSearch", None) => Route::FilmSearch,
            ("SearchFilmName", None) => Route::SearchFilmName,
            ("SearchFilmGenre", None) => Route::SearchFilmGenre,
            ("SearchFilmActor", None) => Route::SearchFilmActor,
            ("displayFilmDetails", id @ Some(_)) => Route::FilmDetails(parse_id(id)?),
            ("displayActorDetails", id @ Some(_)) => Route::ActorDetails(parse_id(id)?),
            ("ViewCustomerDetails", None) => Route::ViewCustomers,
            ("ViewCustomerDetails", id @ Some(_)) => Route::CustomerDetails(parse_id(id)?),
            ("SearchCustomer", None) => Route::SearchCustomer,
            ("AddCustomer", None) => Route::AddCustomer,
            ("EditCustomer", None) => Route::EditCustomer(None),
            ("EditCustomer", id @ Some(_)) => Route::EditCustomer(Some(parse_id(id)?)),
            ("DeleteCustomer", None) => Route::DeleteCustomer(None),
            ("DeleteCustomer", id @ Some(_)) => Route::DeleteCustomer(Some(parse_id(id)?)),
            ("ReturnMovie", None) => Route::ReturnMovie,
            _ => return None,
        };

        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => String::from("/"),
            Route::FiveMovies => String::from("/FiveMovies"),
            Route::FiveActors => String::from("/FiveActors"),
            Route::FilmSearch => String::from("/FilmSearch"),
            Route::SearchFilmName => String::from("/SearchFilmName"),
            Route::SearchFilmGenre => String::from("/SearchFilmGenre"),
            Route::SearchFilmActor => String::from("/SearchFilmActor"),
            Route::FilmDetails(id) => format!("/displayFilmDetails/{id}"),
            Route::ActorDetails(id) => format!("/displayActorDetails/{id}"),
            Route::ViewCustomers => String::from("/ViewCustomerDetails"),
            Route::SearchCustomer => String::from("/SearchCustomer"),
            Route::CustomerDetails(id) => format!("/ViewCustomerDetails/{id}"),
            Route::AddCustomer => String::from("/AddCustomer"),
            Route::EditCustomer(None) => String::from("/EditCustomer"),
            Route::EditCustomer(Some(id)) => format!("/EditCustomer/{id}"),
            Route::DeleteCustomer(None) => String::from("/DeleteCustomer"),
            Route::DeleteCustomer(Some(id)) => format!("/DeleteCustomer/{id}"),
            Route::ReturnMovie => String::from("/ReturnMovie"),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home Page",
            Route::FiveMovies => "Top 5 Rented Movies",
            Route::FiveActors => "Top 5 Actors By Number of Films",
            Route::FilmSearch => "Film Search",
            Route::SearchFilmName => "Search By Film Name",
            Route::SearchFilmGenre => "Search By Category Name",
            Route::SearchFilmActor => "Search By Actor Name",
            Route::FilmDetails(_) => "Film Details",
            Route::ActorDetails(_) => "Actor Details (Top 5 Rented Movies)",
            Route::ViewCustomers => "Customer Details",
            Route::SearchCustomer => "Search Customers",
            Route::CustomerDetails(_) => "Customer Rental History",
            Route::AddCustomer => "Add Customer",
            Route::EditCustomer(_) => "Edit Customer",
            Route::DeleteCustomer(_) => "Delete Customer",
            Route::ReturnMovie => "Return Movie",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_detail_paths() {
        assert_eq!(
            Route::parse("/displayFilmDetails/7"),
            Some(Route::FilmDetails(7))
        );
        assert_eq!(
            Route::parse("/displayActorDetails/12"),
            Some(Route::ActorDetails(12))
        );
        assert_eq!(
            Route::parse("/ViewCustomerDetails/3"),
            Some(Route::CustomerDetails(3))
        );
        assert_eq!(Route::parse("/ViewCustomerDetails"), Some(Route::ViewCustomers));
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
    }

    #[test]
    fn optional_ids() {
        assert_eq!(Route::parse("/EditCustomer"), Some(Route::EditCustomer(None)));
        assert_eq!(
            Route::parse("/DeleteCustomer/9"),
            Some(Route::DeleteCustomer(Some(9)))
        );
    }

    #[test]
    fn rejects_unknown_or_malformed() {
        assert_eq!(Route::parse("/displayFilmDetails"), None);
        assert_eq!(Route::parse("/displayFilmDetails/abc"), None);
        assert_eq!(Route::parse("/displayFilmDetails/7/extra"), None);
        assert_eq!(Route::parse("/FiveMovies/1"), None);
        assert_eq!(Route::parse("/nowhere"), None);
    }

    #[test]
    fn paths_parse_back() {
        let routes = [
            Route::Home,
            Route::FiveMovies,
            Route::SearchFilmGenre,
            Route::FilmDetails(7),
            Route::CustomerDetails(1),
            Route::EditCustomer(Some(4)),
            Route::DeleteCustomer(None),
            Route::ReturnMovie,
        ];

        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }
}
