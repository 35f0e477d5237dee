use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::model::{
    ActorFilm, ActorSummary, Customer, CustomerFields, CustomerRental, FilmDetails, FilmSummary,
    NewRental, RentalConfirmation,
};

/// One operation against the API together with its request body
#[derive(Clone, Debug, PartialEq)]
pub enum ApiCall {
    TopFiveFilms,
    TopFiveActors,
    FilmDetails(u32),
    ActorDetails(u32),
    SearchByTitle(String),
    SearchByCategory(String),
    SearchByActor(String),
    ViewCustomers,
    SearchCustomer(String),
    CustomerDetails(u32),
    AddCustomer(CustomerFields),
    EditCustomer { id: String, fields: CustomerFields },
    DeleteCustomer(String),
    AddRental(NewRental),
    ConfirmRental(RentalConfirmation),
    ReturnMovie(String),
}

impl ApiCall {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            ApiCall::TopFiveFilms => Endpoint::TopFiveFilms,
            ApiCall::TopFiveActors => Endpoint::TopFiveActors,
            ApiCall::FilmDetails(id) => Endpoint::DisplayFilmDetails(*id),
            ApiCall::ActorDetails(id) => Endpoint::DisplayActorDetails(*id),
            ApiCall::SearchByTitle(text) => Endpoint::SearchByTitle(text.clone()),
            ApiCall::SearchByCategory(text) => Endpoint::SearchByCategory(text.clone()),
            ApiCall::SearchByActor(text) => Endpoint::SearchByActor(text.clone()),
            ApiCall::ViewCustomers => Endpoint::ViewCustomers,
            ApiCall::SearchCustomer(input) => Endpoint::SearchCustomer(input.clone()),
            ApiCall::CustomerDetails(id) => Endpoint::ViewCustomerDetails(*id),
            ApiCall::AddCustomer(_) => Endpoint::AddCustomer,
            ApiCall::EditCustomer { id, .. } => Endpoint::EditCustomer(id.clone()),
            ApiCall::DeleteCustomer(id) => Endpoint::DeleteCustomer(id.clone()),
            ApiCall::AddRental(_) => Endpoint::AddRental,
            ApiCall::ConfirmRental(_) => Endpoint::ConfirmRental,
            ApiCall::ReturnMovie(id) => Endpoint::ReturnMovie(id.clone()),
        }
    }
}

/// Decoded payload of a successful call
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Films(Vec<FilmSummary>),
    Actors(Vec<ActorSummary>),
    FilmDetails(Vec<FilmDetails>),
    ActorDetails(Vec<ActorFilm>),
    Customers(Vec<Customer>),
    CustomerDetails(Vec<CustomerRental>),
    Message(String),
}

impl Reply {
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Films(_) => "films",
            Reply::Actors(_) => "actors",
            Reply::FilmDetails(_) => "film details",
            Reply::ActorDetails(_) => "actor details",
            Reply::Customers(_) => "customers",
            Reply::CustomerDetails(_) => "customer details",
            Reply::Message(_) => "message",
        }
    }
}

macro_rules! reply_payload {
    ($($variant:ident => $payload:ty),* $(,)?) => {
        $(
            impl TryFrom<Reply> for $payload {
                type Error = ApiError;

                fn try_from(reply: Reply) -> Result<Self, Self::Error> {
                    match reply {
                        Reply::$variant(payload) => Ok(payload),
                        other => Err(ApiError::UnexpectedReply(other.kind())),
                    }
                }
            }
        )*
    };
}

reply_payload! {
    Films => Vec<FilmSummary>,
    Actors => Vec<ActorSummary>,
    FilmDetails => Vec<FilmDetails>,
    ActorDetails => Vec<ActorFilm>,
    Customers => Vec<Customer>,
    CustomerDetails => Vec<CustomerRental>,
    Message => String,
}
