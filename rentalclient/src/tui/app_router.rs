use super::components::{
    actor_details::ActorDetailsPage,
    component::{Component, ComponentRender, RenderProps},
    customer_details::CustomerDetailsPage,
    customers::CustomersPage,
    film_details::FilmDetailsPage,
    form::FormPage,
    menu::Menu,
    records::Records,
    search::SearchPage,
    status_log::StatusLog,
    text_field::TextField,
};
use crate::state_handler::{parse_command, Action, ClientState, Route};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

enum Page {
    Menu(Menu),
    Records(Records),
    Search(SearchPage),
    FilmDetails(FilmDetailsPage),
    ActorDetails(ActorDetailsPage),
    Customers(CustomersPage),
    CustomerDetails(CustomerDetailsPage),
    Form(FormPage),
}

impl Page {
    fn mount(state: &ClientState, action_tx: UnboundedSender<Action>) -> Self {
        match state.route {
            Route::Home | Route::FilmSearch => Page::Menu(Menu::new(state, action_tx)),
            Route::FiveMovies | Route::FiveActors => Page::Records(Records::new(state, action_tx)),
            Route::SearchFilmName
            | Route::SearchFilmGenre
            | Route::SearchFilmActor
            | Route::SearchCustomer => Page::Search(SearchPage::new(state, action_tx)),
            Route::FilmDetails(_) => Page::FilmDetails(FilmDetailsPage::new(state, action_tx)),
            Route::ActorDetails(_) => Page::ActorDetails(ActorDetailsPage::new(state, action_tx)),
            Route::ViewCustomers => Page::Customers(CustomersPage::new(state, action_tx)),
            Route::CustomerDetails(_) => {
                Page::CustomerDetails(CustomerDetailsPage::new(state, action_tx))
            }
            Route::AddCustomer
            | Route::EditCustomer(_)
            | Route::DeleteCustomer(_)
            | Route::ReturnMovie => Page::Form(FormPage::new(state, action_tx)),
        }
    }

    fn update(self, state: &ClientState) -> Self {
        match self {
            Page::Menu(page) => Page::Menu(page.update(state)),
            Page::Records(page) => Page::Records(page.update(state)),
            Page::Search(page) => Page::Search(page.update(state)),
            Page::FilmDetails(page) => Page::FilmDetails(page.update(state)),
            Page::ActorDetails(page) => Page::ActorDetails(page.update(state)),
            Page::Customers(page) => Page::Customers(page.update(state)),
            Page::CustomerDetails(page) => Page::CustomerDetails(page.update(state)),
            Page::Form(page) => Page::Form(page.update(state)),
        }
    }

    fn component(&self) -> &dyn Component {
        match self {
            Page::Menu(page) => page,
            Page::Records(page) => page,
            Page::Search(page) => page,
            Page::FilmDetails(page) => page,
            Page::ActorDetails(page) => page,
            Page::Customers(page) => page,
            Page::CustomerDetails(page) => page,
            Page::Form(page) => page,
        }
    }

    fn component_mut(&mut self) -> &mut dyn Component {
        match self {
            Page::Menu(page) => page,
            Page::Records(page) => page,
            Page::Search(page) => page,
            Page::FilmDetails(page) => page,
            Page::ActorDetails(page) => page,
            Page::Customers(page) => page,
            Page::CustomerDetails(page) => page,
            Page::Form(page) => page,
        }
    }

    fn render(&self, frame: &mut Frame, props: RenderProps) {
        match self {
            Page::Menu(page) => page.render(frame, props),
            Page::Records(page) => page.render(frame, props),
            Page::Search(page) => page.render(frame, props),
            Page::FilmDetails(page) => page.render(frame, props),
            Page::ActorDetails(page) => page.render(frame, props),
            Page::Customers(page) => page.render(frame, props),
            Page::CustomerDetails(page) => page.render(frame, props),
            Page::Form(page) => page.render(frame, props),
        }
    }
}

/// Shell around the current page: header, status log and command bar
pub struct AppRouter {
    route: Route,
    page: Page,
    status_log: StatusLog,
    command_bar: Option<TextField>,
    action_tx: UnboundedSender<Action>,
}

impl AppRouter {
    fn send(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        let Some(command_bar) = self.command_bar.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.command_bar = None,
            KeyCode::Enter => {
                let line = command_bar.value().to_string();
                self.command_bar = None;
                if line.trim().is_empty() {
                    return;
                }

                self.send(parse_command(line).unwrap_or(Action::Invalid));
            }
            _ => {
                command_bar.handle_key_event(key);
            }
        }
    }
}

impl Component for AppRouter {
    fn new(state: &ClientState, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            route: state.route.clone(),
            page: Page::mount(state, action_tx.clone()),
            status_log: StatusLog::new(state, action_tx.clone()),
            command_bar: None,
            action_tx,
        }
    }

    fn update(self, state: &ClientState) -> Self
    where
        Self: Sized,
    {
        // Pages keep their cursor and open forms until the route changes
        let page = match state.route == self.route {
            true => self.page.update(state),
            false => Page::mount(state, self.action_tx.clone()),
        };

        Self {
            route: state.route.clone(),
            page,
            status_log: self.status_log.update(state),
            command_bar: self.command_bar,
            action_tx: self.action_tx,
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if self.command_bar.is_some() {
            self.handle_command_key(key);
            return true;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.send(Action::Quit);
            return true;
        }

        if self.page.component_mut().handle_key_event(key) {
            return true;
        }

        if key.code == KeyCode::Esc {
            self.send(Action::Back);
            return true;
        }

        if self.is_editing() {
            return false;
        }

        match key.code {
            KeyCode::Char(':') => self.command_bar = Some(TextField::with_value("Command", "/")),
            KeyCode::Char('q') => self.send(Action::Quit),
            KeyCode::Char('h') => self.send(Action::Navigate { route: Route::Home }),
            KeyCode::Char('b') | KeyCode::Backspace => self.send(Action::Back),
            KeyCode::Char('R') | KeyCode::F(5) => self.send(Action::Reload),
            KeyCode::Char('?') => self.send(Action::Help),
            _ => return false,
        }

        true
    }

    fn is_editing(&self) -> bool {
        self.command_bar.is_some() || self.page.component().is_editing()
    }
}

impl ComponentRender<()> for AppRouter {
    fn render(&self, frame: &mut Frame, _props: ()) {
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(7),
            Constraint::Length(3),
        ])
        .split(frame.area());

        let header = Line::from(vec![
            Span::styled(
                format!(" {} ", self.route.title()),
                Style::new()
                    .fg(Color::Black)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}", self.route.path()), Style::new().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(header), layout[0]);

        let page_color = match self.command_bar.is_some() {
            true => Color::DarkGray,
            false => Color::White,
        };
        self.page.render(
            frame,
            RenderProps {
                area: layout[1],
                border_color: page_color,
            },
        );

        self.status_log.render(
            frame,
            RenderProps {
                area: layout[2],
                border_color: Color::Gray,
            },
        );

        match &self.command_bar {
            Some(command_bar) => command_bar.render(
                frame,
                RenderProps {
                    area: layout[3],
                    border_color: Color::Yellow,
                },
                true,
            ),
            None => {
                let hint = Paragraph::new(Line::from(
                    " : command   Esc back   h home   R reload   ? help   q quit",
                ))
                .style(Style::new().fg(Color::DarkGray));
                frame.render_widget(hint, layout[3]);
            }
        }
    }
}
