use super::component::{remote_status, Component, ComponentRender, RenderProps};
use super::item_list::{Item, ItemList};
use super::text_field::TextField;
use crate::state_handler::{Action, ClientState, PageState, Route, SearchKind};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Focus {
    Query,
    Results,
}

/// Query box over a result list, shared by the film and customer searches
pub struct SearchPage {
    title: &'static str,
    field: TextField,
    focus: Focus,
    status: Option<Line<'static>>,
    results: ItemList,
    action_tx: UnboundedSender<Action>,
}

fn results(state: &ClientState) -> (Option<SearchKind>, Vec<Item>, Option<Line<'static>>) {
    match &state.page {
        PageState::FilmSearch(search) => {
            let items = search
                .results
                .data()
                .map(|films| {
                    films
                        .iter()
                        .map(|film| Item::new(film.label(), Route::FilmDetails(film.film_id)))
                        .collect()
                })
                .unwrap_or_default();

            (Some(search.kind), items, remote_status(search.results.state()))
        }
        PageState::CustomerSearch(search) => {
            let items = search
                .results
                .data()
                .map(|customers| {
                    customers
                        .iter()
                        .map(|customer| {
                            let label = format!(
                                "#{} {} {}",
                                customer.customer_id,
                                customer.full_name(),
                                customer.email.as_deref().unwrap_or_default()
                            );
                            Item::new(label, Route::CustomerDetails(customer.customer_id))
                        })
                        .collect()
                })
                .unwrap_or_default();

            (Some(search.kind), items, remote_status(search.results.state()))
        }
        _ => (None, vec![], None),
    }
}

impl SearchPage {
    fn submit(&mut self) {
        let query = self.field.value().trim().to_string();
        if query.is_empty() {
            return;
        }

        let _ = self.action_tx.send(Action::Search { query });
    }
}

impl Component for SearchPage {
    fn new(state: &ClientState, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        let (kind, items, status) = results(state);
        let label = kind.map(|kind| kind.placeholder()).unwrap_or("Search");

        Self {
            title: state.route.title(),
            field: TextField::new(label),
            focus: Focus::Query,
            status,
            results: ItemList::new(items, action_tx.clone()),
            action_tx,
        }
    }

    fn update(mut self, state: &ClientState) -> Self
    where
        Self: Sized,
    {
        let (_, items, status) = results(state);
        if items.is_empty() {
            self.focus = Focus::Query;
        }
        self.results.set_items(items);
        self.status = status;

        self
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match (self.focus, key.code) {
            (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
                self.focus = match self.focus {
                    Focus::Query if !self.results.items().is_empty() => Focus::Results,
                    _ => Focus::Query,
                };
                true
            }
            (Focus::Query, KeyCode::Enter) => {
                self.submit();
                true
            }
            (Focus::Query, KeyCode::Down) if !self.results.items().is_empty() => {
                self.focus = Focus::Results;
                true
            }
            (Focus::Query, _) => self.field.handle_key_event(key),
            (Focus::Results, _) => self.results.handle_key_event(key),
        }
    }

    fn is_editing(&self) -> bool {
        self.focus == Focus::Query
    }
}

impl ComponentRender<RenderProps> for SearchPage {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(props.area);

        self.field.render(
            frame,
            RenderProps {
                area: layout[0],
                border_color: props.border_color,
            },
            self.focus == Focus::Query,
        );

        if let Some(status) = &self.status {
            frame.render_widget(Paragraph::new(status.clone()), layout[1]);
        }

        self.results.render(
            frame,
            RenderProps {
                area: layout[2],
                border_color: props.border_color,
            },
            self.title,
            self.focus == Focus::Results,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_handler::Completion;
    use common::model::Customer;
    use common::Reply;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(page: &mut SearchPage, text: &str) {
        for c in text.chars() {
            page.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn enter_submits_trimmed_query() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut state = ClientState::default();
        state.navigate(Route::SearchFilmGenre);
        let mut page = SearchPage::new(&state, action_tx);

        page.handle_key_event(key(KeyCode::Enter));
        assert!(action_rx.try_recv().is_err());

        type_text(&mut page, " Horror ");
        assert!(page.is_editing());
        page.handle_key_event(key(KeyCode::Enter));

        assert_eq!(
            action_rx.try_recv().unwrap(),
            Action::Search {
                query: String::from("Horror")
            }
        );
    }

    #[test]
    fn customer_results_open_details() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut state = ClientState::default();
        state.navigate(Route::SearchCustomer);
        let requests = state.handle_action(Action::Search {
            query: String::from("mary"),
        });
        state.complete(Completion {
            ticket: requests[0].ticket,
            result: Ok(Reply::Customers(vec![Customer {
                customer_id: 1,
                first_name: String::from("MARY"),
                last_name: String::from("SMITH"),
                email: Some(String::from("mary.smith@sakilacustomer.org")),
                store_id: Some(1),
                address_id: Some(5),
            }])),
        });

        let mut page = SearchPage::new(&state, action_tx);
        assert_eq!(page.results.items().len(), 1);

        page.handle_key_event(key(KeyCode::Tab));
        assert!(!page.is_editing());
        page.handle_key_event(key(KeyCode::Enter));

        assert_eq!(
            action_rx.try_recv().unwrap(),
            Action::Navigate {
                route: Route::CustomerDetails(1)
            }
        );
    }

    #[test]
    fn tab_stays_on_query_without_results() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let mut state = ClientState::default();
        state.navigate(Route::SearchFilmActor);
        let mut page = SearchPage::new(&state, action_tx);

        page.handle_key_event(key(KeyCode::Tab));

        assert!(page.is_editing());
        assert_eq!(page.field.label(), "Enter actor");
    }
}
