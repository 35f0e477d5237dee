use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };

        write!(f, "{name}")
    }
}

/// Every route of the rental API the client talks to.
///
/// Path parameters are carried raw; transports are responsible for encoding
/// them as URL segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    TopFiveFilms,
    TopFiveActors,
    DisplayFilmDetails(u32),
    DisplayActorDetails(u32),
    SearchByTitle(String),
    SearchByCategory(String),
    SearchByActor(String),
    ViewCustomers,
    SearchCustomer(String),
    ViewCustomerDetails(u32),
    AddCustomer,
    EditCustomer(String),
    DeleteCustomer(String),
    AddRental,
    ConfirmRental,
    ReturnMovie(String),
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::AddCustomer
            | Endpoint::AddRental
            | Endpoint::ConfirmRental
            | Endpoint::ReturnMovie(_) => Method::Post,
            Endpoint::EditCustomer(_) => Method::Patch,
            Endpoint::DeleteCustomer(_) => Method::Delete,
            _ => Method::Get,
        }
    }

    /// Unencoded path segments
    pub fn segments(&self) -> Vec<String> {
        let (head, param) = match self {
            Endpoint::TopFiveFilms => ("topFiveFilms", None),
            Endpoint::TopFiveActors => ("topFiveActors", None),
            Endpoint::DisplayFilmDetails(id) => ("displayFilmDetails", Some(id.to_string())),
            Endpoint::DisplayActorDetails(id) => ("displayActorDetails", Some(id.to_string())),
            Endpoint::SearchByTitle(text) => ("searchByTitle", Some(text.clone())),
            Endpoint::SearchByCategory(text) => ("searchByCategory", Some(text.clone())),
            Endpoint::SearchByActor(text) => ("searchByActor", Some(text.clone())),
            Endpoint::ViewCustomers => ("viewCustomers", None),
            Endpoint::SearchCustomer(_) => ("searchCustomer", None),
            Endpoint::ViewCustomerDetails(id) => ("viewCustomerDetails", Some(id.to_string())),
            Endpoint::AddCustomer => ("addCustomer", None),
            Endpoint::EditCustomer(id) => ("editCustomer", Some(id.clone())),
            Endpoint::DeleteCustomer(id) => ("deleteCustomer", Some(id.clone())),
            Endpoint::AddRental => ("addRental", None),
            Endpoint::ConfirmRental => ("confirmRental", None),
            Endpoint::ReturnMovie(id) => ("returnMovie", Some(id.clone())),
        };

        let mut segments = vec![head.to_string()];
        segments.extend(param);

        segments
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::SearchCustomer(input) => vec![("searchInput", input.clone())],
            _ => vec![],
        }
    }

    /// Human readable path, e.g. `/searchByTitle/matrix`
    pub fn path(&self) -> String {
        let mut path = format!("/{}", self.segments().join("/"));

        let query = self.query();
        if !query.is_empty() {
            let pairs: Vec<String> = query
                .into_iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            path.push('?');
            path.push_str(&pairs.join("&"));
        }

        path
    }

    /// Key of the JSON envelope holding a successful response's payload.
    /// The server uses a different key per route and no rule relates them.
    pub fn envelope_key(&self) -> &'static str {
        match self {
            Endpoint::TopFiveFilms | Endpoint::SearchByTitle(_) => "film",
            Endpoint::TopFiveActors => "actor",
            Endpoint::DisplayFilmDetails(_) => "film_details",
            Endpoint::DisplayActorDetails(_) => "actor_details",
            Endpoint::SearchByCategory(_) => "category",
            Endpoint::SearchByActor(_) => "name",
            Endpoint::ViewCustomers | Endpoint::SearchCustomer(_) => "customers",
            Endpoint::ViewCustomerDetails(_) => "customer",
            Endpoint::AddCustomer
            | Endpoint::EditCustomer(_)
            | Endpoint::DeleteCustomer(_)
            | Endpoint::AddRental
            | Endpoint::ConfirmRental
            | Endpoint::ReturnMovie(_) => "message",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
