use super::component::{detail_line, remote_status, Component, ComponentRender, RenderProps};
use super::form::{outcome_line, FieldGroup};
use super::text_field::TextField;
use crate::state_handler::{Action, ClientState, PageState, Route};

use common::model::ActorFilm;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

/// An actor's most rented films, with the legacy confirm-rental form
pub struct ActorDetailsPage {
    films: Vec<ActorFilm>,
    status: Option<Line<'static>>,
    selected: usize,
    confirm_form: Option<FieldGroup>,
    outcome: Option<Line<'static>>,
    action_tx: UnboundedSender<Action>,
}

fn page_data(state: &ClientState) -> (Vec<ActorFilm>, Option<Line<'static>>, Option<Line<'static>>) {
    match &state.page {
        PageState::ActorDetails(page) => (
            page.films.data().cloned().unwrap_or_default(),
            remote_status(page.films.state()),
            outcome_line(page.rental.state()),
        ),
        _ => (vec![], None, None),
    }
}

impl ActorDetailsPage {
    fn selected_film(&self) -> Option<&ActorFilm> {
        self.films.get(self.selected)
    }

    fn submit(&mut self) {
        let Some(form) = &self.confirm_form else {
            return;
        };
        let Some(film_id) = self.selected_film().and_then(|film| film.film_id) else {
            return;
        };

        let full_name = form.value(0).trim().to_string();
        if full_name.is_empty() {
            return;
        }

        let _ = self
            .action_tx
            .send(Action::ConfirmRental { full_name, film_id });
    }
}

impl Component for ActorDetailsPage {
    fn new(state: &ClientState, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        let (films, status, outcome) = page_data(state);

        Self {
            films,
            status,
            selected: 0,
            confirm_form: None,
            outcome,
            action_tx,
        }
    }

    fn update(mut self, state: &ClientState) -> Self
    where
        Self: Sized,
    {
        let (films, status, outcome) = page_data(state);
        self.selected = self.selected.min(films.len().saturating_sub(1));
        self.films = films;
        self.status = status;
        self.outcome = outcome;

        if let PageState::ActorDetails(page) = &state.page {
            if page.rental.data().is_some() {
                self.confirm_form = None;
            }
        }

        self
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if let Some(form) = self.confirm_form.as_mut() {
            match key.code {
                KeyCode::Esc => self.confirm_form = None,
                KeyCode::Enter => self.submit(),
                _ => return form.handle_key_event(key),
            }

            return true;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.films.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(film_id) = self.selected_film().and_then(|film| film.film_id) {
                    let _ = self.action_tx.send(Action::Navigate {
                        route: Route::FilmDetails(film_id),
                    });
                }
            }
            KeyCode::Char('r') if self.selected_film().is_some_and(|f| f.film_id.is_some()) => {
                self.confirm_form = Some(FieldGroup::new(vec![TextField::new("Full Name")]));
            }
            _ => return false,
        }

        true
    }

    fn is_editing(&self) -> bool {
        self.confirm_form.is_some()
    }
}

impl ComponentRender<RenderProps> for ActorDetailsPage {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        let form_height = self.confirm_form.as_ref().map_or(0, |form| form.height());
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(form_height),
            Constraint::Length(1),
        ])
        .split(props.area);

        let heading = match (&self.status, self.films.first()) {
            (Some(status), _) => status.clone(),
            (None, Some(film)) => Line::from(format!("{} {}", film.first_name, film.last_name))
                .style(Style::new().add_modifier(Modifier::BOLD)),
            (None, None) => Line::from("No films for this actor."),
        };
        frame.render_widget(Paragraph::new(heading), layout[0]);

        let rows = self.films.iter().map(|film| {
            Row::new(vec![
                film.film_title.clone(),
                film.category.clone().unwrap_or_default(),
                film.release_year.map(|y| y.to_string()).unwrap_or_default(),
                film.length.map(|l| format!("{l} min")).unwrap_or_default(),
                film.rating.clone().unwrap_or_default(),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(40),
                Constraint::Percentage(20),
                Constraint::Length(6),
                Constraint::Length(8),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec!["Film", "Category", "Year", "Length", "Rating"])
                .style(Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        )
        .row_highlight_style(Style::new().fg(Color::Black).bg(Color::Cyan))
        .highlight_symbol("> ")
        .block(
            Block::default()
                .title("Actor Details (Top 5 Rented Movies)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(props.border_color)),
        );
        let mut table_state = TableState::default().with_selected(match self.films.is_empty() {
            true => None,
            false => Some(self.selected),
        });
        frame.render_stateful_widget(table, layout[1], &mut table_state);

        if let Some(film) = self.selected_film() {
            let description = Paragraph::new(detail_line("Description", film.description.clone()))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::TOP));
            frame.render_widget(description, layout[2]);
        }

        if let Some(form) = &self.confirm_form {
            form.render(
                frame,
                RenderProps {
                    area: layout[3],
                    border_color: props.border_color,
                },
            );
        }

        let footer = match (&self.outcome, &self.confirm_form) {
            (Some(outcome), _) => outcome.clone(),
            (None, Some(_)) => Line::from("Enter to confirm, Esc to cancel"),
            (None, None) => Line::from("Enter opens the film, r rents it")
                .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(Paragraph::new(footer), layout[4]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_handler::Completion;
    use common::Reply;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn film(film_id: Option<u32>, title: &str) -> ActorFilm {
        ActorFilm {
            actor_id: 107,
            first_name: String::from("GINA"),
            last_name: String::from("DEGENERES"),
            film_id,
            film_title: title.to_string(),
            description: None,
            release_year: Some(2006),
            length: Some(90),
            rating: Some(String::from("PG")),
            category: Some(String::from("Games")),
        }
    }

    fn loaded(films: Vec<ActorFilm>) -> ClientState {
        let mut state = ClientState::default();
        let requests = state.navigate(Route::ActorDetails(107));
        state.complete(Completion {
            ticket: requests[0].ticket,
            result: Ok(Reply::ActorDetails(films)),
        });

        state
    }

    #[test]
    fn confirm_rental_uses_selected_film() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let state = loaded(vec![film(Some(1), "ACADEMY DINOSAUR"), film(Some(9), "GOODFELLAS SALUTE")]);
        let mut page = ActorDetailsPage::new(&state, action_tx);

        page.handle_key_event(key(KeyCode::Down));
        page.handle_key_event(key(KeyCode::Char('r')));
        assert!(page.is_editing());
        for c in "Mary Smith".chars() {
            page.handle_key_event(key(KeyCode::Char(c)));
        }
        page.handle_key_event(key(KeyCode::Enter));

        assert_eq!(
            action_rx.try_recv().unwrap(),
            Action::ConfirmRental {
                full_name: String::from("Mary Smith"),
                film_id: 9,
            }
        );
    }

    #[test]
    fn rows_without_film_id_cannot_rent() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let state = loaded(vec![film(None, "ACADEMY DINOSAUR")]);
        let mut page = ActorDetailsPage::new(&state, action_tx);

        assert!(!page.handle_key_event(key(KeyCode::Char('r'))));
        assert!(!page.is_editing());

        page.handle_key_event(key(KeyCode::Enter));
        assert!(action_rx.try_recv().is_err());
    }

    #[test]
    fn enter_opens_film() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let state = loaded(vec![film(Some(1), "ACADEMY DINOSAUR")]);
        let mut page = ActorDetailsPage::new(&state, action_tx);

        page.handle_key_event(key(KeyCode::Enter));

        assert_eq!(
            action_rx.try_recv().unwrap(),
            Action::Navigate {
                route: Route::FilmDetails(1)
            }
        );
    }
}
