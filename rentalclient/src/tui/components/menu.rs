use super::component::{Component, ComponentRender, RenderProps};
use super::item_list::{Item, ItemList};
use crate::state_handler::{Action, ClientState, Route};

use crossterm::event::KeyEvent;
use ratatui::Frame;
use tokio::sync::mpsc::UnboundedSender;

/// Static navigation page (home page and the film search chooser)
pub struct Menu {
    title: &'static str,
    list: ItemList,
}

fn entries(route: &Route) -> Vec<Item> {
    let entries = match route {
        Route::FilmSearch => vec![
            ("Search By Film Name", Route::SearchFilmName),
            ("Search Film By Actors", Route::SearchFilmActor),
            ("Search By Genre", Route::SearchFilmGenre),
        ],
        _ => vec![
            ("Movies: Top 5 Rented Movies Of All Time", Route::FiveMovies),
            ("Movies: Top 5 Actors By Number of Films", Route::FiveActors),
            ("Movies: Film Search", Route::FilmSearch),
            ("Customers: View Customers", Route::ViewCustomers),
            ("Customers: Search Customers", Route::SearchCustomer),
            ("Customers: Add Customer", Route::AddCustomer),
            ("Customers: Edit Customer", Route::EditCustomer(None)),
            ("Customers: Delete Customer", Route::DeleteCustomer(None)),
            ("Customers: Return Movie", Route::ReturnMovie),
        ],
    };

    entries
        .into_iter()
        .map(|(label, route)| Item::new(label.to_string(), route))
        .collect()
}

impl Component for Menu {
    fn new(state: &ClientState, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        Self {
            title: state.route.title(),
            list: ItemList::new(entries(&state.route), action_tx),
        }
    }

    fn update(self, _state: &ClientState) -> Self
    where
        Self: Sized,
    {
        self
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        self.list.handle_key_event(key)
    }
}

impl ComponentRender<RenderProps> for Menu {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        self.list.render(frame, props, self.title, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::mpsc;

    #[test]
    fn film_search_menu_offers_three_searches() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut state = ClientState::default();
        state.navigate(Route::FilmSearch);

        let mut menu = Menu::new(&state, action_tx);
        assert_eq!(menu.list.items().len(), 3);

        menu.handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        menu.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(
            action_rx.try_recv().unwrap(),
            Action::Navigate {
                route: Route::SearchFilmActor
            }
        );
    }
}
