use super::component::{detail_line, remote_status, Component, ComponentRender, RenderProps};
use super::form::{outcome_line, FieldGroup};
use super::text_field::TextField;
use crate::state_handler::{Action, ClientState, PageState};

use common::model::FilmDetails;
use common::RemoteState;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

fn film_lines(film: &FilmDetails) -> Vec<Line<'static>> {
    vec![
        detail_line("Title", Some(film.title.clone())),
        detail_line("Description", film.description.clone()),
        detail_line("Release Year", film.release_year.map(|y| y.to_string())),
        detail_line("Category", film.category.clone()),
        detail_line("Length", film.length.map(|l| format!("{l} minutes"))),
        detail_line("Rating", film.rating.clone()),
        detail_line("Special Features", film.special_features.clone()),
        detail_line("Rental Duration", film.rental_duration.map(|d| format!("{d} days"))),
        detail_line("Rental Rate", film.rental_rate.as_ref().map(|r| format!("${r}"))),
        detail_line("Copies Available", film.total_available.map(|n| n.to_string())),
    ]
}

fn page_lines(state: &ClientState) -> (u32, Vec<Line<'static>>, Option<Line<'static>>) {
    let PageState::FilmDetails(page) = &state.page else {
        return (0, vec![], None);
    };

    let lines = match page.details.state() {
        RemoteState::Success(details) => match details.first() {
            Some(film) => film_lines(film),
            None => vec![Line::from("No details for this film.")],
        },
        other => remote_status(other).into_iter().collect(),
    };
    let outcome = outcome_line(page.rental.state()).or_else(|| outcome_line(page.confirmation.state()));

    (page.film_id, lines, outcome)
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum FormMode {
    Rent,
    Confirm,
}

/// Film record; `r` reveals the rent form, `c` the confirm-rental form
pub struct FilmDetailsPage {
    film_id: u32,
    lines: Vec<Line<'static>>,
    form: Option<(FormMode, FieldGroup)>,
    submitted: bool,
    outcome: Option<Line<'static>>,
    action_tx: UnboundedSender<Action>,
}

impl FilmDetailsPage {
    fn submit(&mut self) {
        let Some((mode, form)) = &self.form else {
            return;
        };

        let action = match mode {
            FormMode::Rent => {
                let customer_id = form.value(0).trim().to_string();
                let staff_id = form.value(1).trim().to_string();
                if customer_id.is_empty() || staff_id.is_empty() {
                    return;
                }

                Action::RentFilm {
                    customer_id,
                    staff_id,
                }
            }
            FormMode::Confirm => {
                let full_name = form.value(0).trim().to_string();
                if full_name.is_empty() {
                    return;
                }

                Action::ConfirmRental {
                    full_name,
                    film_id: self.film_id,
                }
            }
        };

        self.submitted = self.action_tx.send(action).is_ok();
    }
}

impl Component for FilmDetailsPage {
    fn new(state: &ClientState, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        let (film_id, lines, outcome) = page_lines(state);

        Self {
            film_id,
            lines,
            form: None,
            submitted: false,
            outcome,
            action_tx,
        }
    }

    fn update(mut self, state: &ClientState) -> Self
    where
        Self: Sized,
    {
        let (film_id, lines, outcome) = page_lines(state);
        self.film_id = film_id;
        self.lines = lines;
        self.outcome = outcome;

        // A successful submission replaces its form with the message
        let succeeded = match (&state.page, self.form.as_ref().map(|(mode, _)| *mode)) {
            (PageState::FilmDetails(page), Some(FormMode::Rent)) => page.rental.data().is_some(),
            (PageState::FilmDetails(page), Some(FormMode::Confirm)) => {
                page.confirmation.data().is_some()
            }
            _ => false,
        };
        if self.submitted && succeeded {
            self.form = None;
            self.submitted = false;
        }

        self
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        let Some((_, form)) = self.form.as_mut() else {
            let form = match key.code {
                KeyCode::Char('r') => (
                    FormMode::Rent,
                    FieldGroup::new(vec![TextField::new("Customer ID"), TextField::new("Staff ID")]),
                ),
                KeyCode::Char('c') => (
                    FormMode::Confirm,
                    FieldGroup::new(vec![TextField::new("Full Name")]),
                ),
                _ => return false,
            };

            self.form = Some(form);
            self.submitted = false;
            return true;
        };

        match key.code {
            KeyCode::Esc => self.form = None,
            KeyCode::Enter => self.submit(),
            _ => return form.handle_key_event(key),
        }

        true
    }

    fn is_editing(&self) -> bool {
        self.form.is_some()
    }
}

impl ComponentRender<RenderProps> for FilmDetailsPage {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        let form_height = self.form.as_ref().map_or(0, |(_, form)| form.height());
        let layout = Layout::vertical([
            Constraint::Min(5),
            Constraint::Length(form_height),
            Constraint::Length(1),
        ])
        .split(props.area);

        let details = Paragraph::new(self.lines.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title("Film Details")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(props.border_color)),
            );
        frame.render_widget(details, layout[0]);

        if let Some((_, form)) = &self.form {
            form.render(
                frame,
                RenderProps {
                    area: layout[1],
                    border_color: props.border_color,
                },
            );
        }

        let footer = match (&self.outcome, self.form.as_ref().map(|(mode, _)| mode)) {
            (Some(outcome), _) => outcome.clone(),
            (None, Some(FormMode::Rent)) => Line::from("Enter to rent, Esc to cancel"),
            (None, Some(FormMode::Confirm)) => Line::from("Enter to confirm the rental, Esc to cancel"),
            (None, None) => Line::from("Press r to rent this film, c to confirm a rental by name")
                .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(Paragraph::new(footer), layout[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_handler::{Completion, Route};
    use common::Reply;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded() -> ClientState {
        let mut state = ClientState::default();
        let requests = state.navigate(Route::FilmDetails(7));
        state.complete(Completion {
            ticket: requests[0].ticket,
            result: Ok(Reply::FilmDetails(vec![FilmDetails {
                film_id: Some(7),
                title: String::from("ACADEMY DINOSAUR"),
                description: Some(String::from("An Epic Drama of a Feminist")),
                release_year: Some(2006),
                category: Some(String::from("Documentary")),
                length: Some(86),
                rating: Some(String::from("PG")),
                special_features: None,
                rental_duration: Some(6),
                rental_rate: Some(String::from("0.99")),
                total_available: Some(8),
                inventory_id: Some(1),
            }])),
        });

        state
    }

    #[test]
    fn renders_every_field() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let page = FilmDetailsPage::new(&loaded(), action_tx);

        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal
            .draw(|f| {
                page.render(
                    f,
                    RenderProps {
                        area: f.area(),
                        border_color: Color::White,
                    },
                )
            })
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(screen.contains("ACADEMY DINOSAUR"));
        assert!(screen.contains("Documentary"));
        assert!(screen.contains("$0.99"));
        assert!(screen.contains("Press r to rent"));
    }

    #[test]
    fn rent_form_needs_both_ids() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut page = FilmDetailsPage::new(&loaded(), action_tx);

        assert!(!page.is_editing());
        page.handle_key_event(key(KeyCode::Char('r')));
        assert!(page.is_editing());

        page.handle_key_event(key(KeyCode::Char('1')));
        page.handle_key_event(key(KeyCode::Enter));
        assert!(action_rx.try_recv().is_err());

        page.handle_key_event(key(KeyCode::Tab));
        page.handle_key_event(key(KeyCode::Char('2')));
        page.handle_key_event(key(KeyCode::Enter));

        assert_eq!(
            action_rx.try_recv().unwrap(),
            Action::RentFilm {
                customer_id: String::from("1"),
                staff_id: String::from("2"),
            }
        );
    }

    #[test]
    fn success_replaces_form() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut state = loaded();
        let mut page = FilmDetailsPage::new(&state, action_tx);
        for code in [
            KeyCode::Char('r'),
            KeyCode::Char('1'),
            KeyCode::Tab,
            KeyCode::Char('2'),
            KeyCode::Enter,
        ] {
            page.handle_key_event(key(code));
        }

        let requests = state.handle_action(action_rx.try_recv().unwrap());
        state.complete(Completion {
            ticket: requests[0].ticket,
            result: Ok(Reply::Message(String::from("Rental added"))),
        });
        let page = page.update(&state);

        assert!(page.form.is_none());
        assert_eq!(
            page.outcome.map(|line| line.to_string()),
            Some(String::from("Rental added"))
        );
    }

    #[test]
    fn confirm_form_sends_name_and_route_film() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut state = ClientState::default();
        let requests = state.navigate(Route::FilmDetails(7));
        state.complete(Completion {
            ticket: requests[0].ticket,
            result: Ok(Reply::FilmDetails(vec![FilmDetails {
                film_id: None,
                title: String::from("ACADEMY DINOSAUR"),
                description: None,
                release_year: None,
                category: None,
                length: None,
                rating: None,
                special_features: None,
                rental_duration: None,
                rental_rate: None,
                total_available: Some(8),
                inventory_id: None,
            }])),
        });
        let mut page = FilmDetailsPage::new(&state, action_tx);

        assert!(page.handle_key_event(key(KeyCode::Char('c'))));
        assert!(page.is_editing());
        page.handle_key_event(key(KeyCode::Enter));
        assert!(action_rx.try_recv().is_err());

        for c in "Mary Smith".chars() {
            page.handle_key_event(key(KeyCode::Char(c)));
        }
        page.handle_key_event(key(KeyCode::Enter));

        let action = action_rx.try_recv().unwrap();
        assert_eq!(
            action,
            Action::ConfirmRental {
                full_name: String::from("Mary Smith"),
                film_id: 7,
            }
        );

        let requests = state.handle_action(action);
        state.complete(Completion {
            ticket: requests[0].ticket,
            result: Ok(Reply::Message(String::from("Rental confirmed"))),
        });
        let page = page.update(&state);

        assert!(page.form.is_none());
        assert_eq!(
            page.outcome.map(|line| line.to_string()),
            Some(String::from("Rental confirmed"))
        );
    }

    #[test]
    fn esc_closes_form_without_leaving() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let mut page = FilmDetailsPage::new(&loaded(), action_tx);

        assert!(!page.handle_key_event(key(KeyCode::Esc)));
        page.handle_key_event(key(KeyCode::Char('r')));
        assert!(page.handle_key_event(key(KeyCode::Esc)));
        assert!(!page.is_editing());
    }
}
