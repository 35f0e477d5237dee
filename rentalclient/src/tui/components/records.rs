use super::component::{remote_status, Component, ComponentRender, RenderProps};
use super::item_list::{Item, ItemList};
use crate::state_handler::{Action, ClientState, PageState, Route};

use common::RemoteState;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

/// Fetch-bound list of films or actors linking to their detail pages
pub struct Records {
    title: &'static str,
    status: Option<Line<'static>>,
    list: ItemList,
}

fn items(state: &ClientState) -> (Vec<Item>, Option<Line<'static>>) {
    match &state.page {
        PageState::TopFilms(films) => {
            let items = films
                .data()
                .map(|films| {
                    films
                        .iter()
                        .map(|film| Item::new(film.label(), Route::FilmDetails(film.film_id)))
                        .collect()
                })
                .unwrap_or_default();

            (items, status(films.state()))
        }
        PageState::TopActors(actors) => {
            let items = actors
                .data()
                .map(|actors| {
                    actors
                        .iter()
                        .map(|actor| {
                            Item::new(actor.full_name(), Route::ActorDetails(actor.actor_id))
                        })
                        .collect()
                })
                .unwrap_or_default();

            (items, status(actors.state()))
        }
        _ => (vec![], None),
    }
}

fn status<T>(state: &RemoteState<Vec<T>>) -> Option<Line<'static>> {
    match state {
        RemoteState::Success(records) if records.is_empty() => Some(Line::from("Nothing to show")),
        other => remote_status(other),
    }
}

impl Component for Records {
    fn new(state: &ClientState, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        let (items, status) = items(state);

        Self {
            title: state.route.title(),
            status,
            list: ItemList::new(items, action_tx),
        }
    }

    fn update(mut self, state: &ClientState) -> Self
    where
        Self: Sized,
    {
        let (items, status) = items(state);
        self.list.set_items(items);
        self.status = status;

        self
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        self.list.handle_key_event(key)
    }
}

impl ComponentRender<RenderProps> for Records {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        let layout = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(props.area);

        if let Some(status) = &self.status {
            frame.render_widget(Paragraph::new(status.clone()), layout[0]);
        }

        self.list.render(
            frame,
            RenderProps {
                area: layout[1],
                border_color: props.border_color,
            },
            self.title,
            true,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_handler::Completion;
    use common::model::{ActorSummary, FilmSummary};
    use common::Reply;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, style::Color, Terminal};
    use tokio::sync::mpsc;

    fn screen(records: &Records) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| {
                records.render(
                    f,
                    RenderProps {
                        area: f.area(),
                        border_color: Color::White,
                    },
                )
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn loaded_films(films: Vec<FilmSummary>) -> ClientState {
        let mut state = ClientState::default();
        let requests = state.navigate(Route::FiveMovies);
        state.complete(Completion {
            ticket: requests[0].ticket,
            result: Ok(Reply::Films(films)),
        });

        state
    }

    #[test]
    fn every_film_links_to_its_details() {
        let films: Vec<FilmSummary> = [(103, "BUCKET BROTHERHOOD"), (738, "ROCKETEER MOTHER"), (489, "JUGGLER HARDLY")]
            .into_iter()
            .map(|(film_id, title)| FilmSummary {
                film_id,
                title: title.to_string(),
                category_name: None,
                category_id: None,
                rental_count: None,
            })
            .collect();
        let state = loaded_films(films.clone());
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut records = Records::new(&state, action_tx);

        assert_eq!(records.list.items().len(), 3);
        let rendered = screen(&records);
        for film in &films {
            assert!(rendered.contains(&film.title));
        }

        for film in &films {
            records.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
            let Action::Navigate { route } = action_rx.try_recv().unwrap() else {
                panic!("expected navigation");
            };
            assert_eq!(route.path(), format!("/displayFilmDetails/{}", film.film_id));
            records.handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        }
    }

    #[test]
    fn actors_link_to_actor_details() {
        let mut state = ClientState::default();
        let requests = state.navigate(Route::FiveActors);
        state.complete(Completion {
            ticket: requests[0].ticket,
            result: Ok(Reply::Actors(vec![ActorSummary {
                actor_id: 107,
                first_name: String::from("GINA"),
                last_name: String::from("DEGENERES"),
            }])),
        });
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut records = Records::new(&state, action_tx);

        assert!(screen(&records).contains("GINA DEGENERES"));
        records.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(
            action_rx.try_recv().unwrap(),
            Action::Navigate {
                route: Route::ActorDetails(107)
            }
        );
    }

    #[test]
    fn empty_and_loading_states_are_visible() {
        let state = loaded_films(vec![]);
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let records = Records::new(&state, action_tx.clone());
        assert!(screen(&records).contains("Nothing to show"));

        let mut state = ClientState::default();
        state.navigate(Route::FiveMovies);
        let records = Records::new(&state, action_tx);
        assert!(screen(&records).contains("Loading..."));
    }
}
