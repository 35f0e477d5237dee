use common::model::CustomerFields;

use super::Route;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Help,
    Navigate { route: Route },
    Back,
    Reload,
    Search { query: String },
    RentFilm { customer_id: String, staff_id: String },
    ConfirmRental { full_name: String, film_id: u32 },
    AddCustomer { fields: CustomerFields },
    EditCustomer { id: String, fields: CustomerFields },
    DeleteCustomer { id: String },
    ReturnMovie { rental_id: String },
    Quit,
    Invalid,
}

/// Parses a line typed into the command bar
pub fn parse_command(string: String) -> Option<Action> {
    let mut tokens = string.split_whitespace();
    if let Some(cmd) = tokens.next() {
        if let Some(cmd_name) = cmd.strip_prefix('/') {
            match cmd_name {
                "help" => {
                    return Some(Action::Help);
                }
                "go" => {
                    let path = tokens.next()?;
                    if tokens.next().is_some() {
                        return None;
                    }

                    let route = Route::parse(path)?;
                    return Some(Action::Navigate { route });
                }
                "home" => {
                    return Some(Action::Navigate { route: Route::Home });
                }
                "back" => {
                    return Some(Action::Back);
                }
                "reload" => {
                    return Some(Action::Reload);
                }
                "quit" => {
                    return Some(Action::Quit);
                }
                _ => {}
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_parses_route() {
        assert_eq!(
            parse_command(String::from("/go /displayFilmDetails/7")),
            Some(Action::Navigate {
                route: Route::FilmDetails(7)
            })
        );
        assert_eq!(
            parse_command(String::from("  /go   /FiveMovies ")),
            Some(Action::Navigate {
                route: Route::FiveMovies
            })
        );
    }

    #[test]
    fn bad_commands() {
        assert_eq!(parse_command(String::from("/go")), None);
        assert_eq!(parse_command(String::from("/go /nowhere")), None);
        assert_eq!(parse_command(String::from("/go / /")), None);
        assert_eq!(parse_command(String::from("go /")), None);
        assert_eq!(parse_command(String::from("/dance")), None);
        assert_eq!(parse_command(String::new()), None);
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_command(String::from("/quit")), Some(Action::Quit));
        assert_eq!(parse_command(String::from("/back")), Some(Action::Back));
        assert_eq!(parse_command(String::from("/reload")), Some(Action::Reload));
        assert_eq!(parse_command(String::from("/help")), Some(Action::Help));
        assert_eq!(
            parse_command(String::from("/home")),
            Some(Action::Navigate { route: Route::Home })
        );
    }
}
