use super::component::{remote_status, Component, ComponentRender, RenderProps};
use crate::state_handler::{page_count, paginate, Action, ClientState, PageState, Route};

use common::model::Customer;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

/// Customer table split into pages of `per_page` rows
pub struct CustomersPage {
    customers: Vec<Customer>,
    status: Option<Line<'static>>,
    per_page: usize,
    page: usize,
    selected: usize,
    action_tx: UnboundedSender<Action>,
}

fn page_data(state: &ClientState) -> (Vec<Customer>, Option<Line<'static>>) {
    match &state.page {
        PageState::Customers(customers) => (
            customers.data().cloned().unwrap_or_default(),
            remote_status(customers.state()),
        ),
        _ => (vec![], None),
    }
}

impl CustomersPage {
    fn pages(&self) -> usize {
        page_count(self.customers.len(), self.per_page)
    }

    fn visible(&self) -> &[Customer] {
        paginate(&self.customers, self.page, self.per_page)
    }

    fn selected_customer(&self) -> Option<&Customer> {
        self.visible().get(self.selected)
    }

    fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.pages().max(1));
        self.selected = 0;
    }

    fn navigate(&self, route: Route) {
        let _ = self.action_tx.send(Action::Navigate { route });
    }
}

impl Component for CustomersPage {
    fn new(state: &ClientState, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        let (customers, status) = page_data(state);

        Self {
            customers,
            status,
            per_page: state.per_page,
            page: 1,
            selected: 0,
            action_tx,
        }
    }

    fn update(mut self, state: &ClientState) -> Self
    where
        Self: Sized,
    {
        let (customers, status) = page_data(state);
        self.customers = customers;
        self.status = status;
        self.per_page = state.per_page;

        let page = self.page;
        let selected = self.selected;
        self.go_to_page(page);
        self.selected = selected.min(self.visible().len().saturating_sub(1));

        self
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.visible().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('n') => self.go_to_page(self.page + 1),
            KeyCode::Left | KeyCode::Char('p') => self.go_to_page(self.page.saturating_sub(1)),
            KeyCode::Enter => {
                if let Some(customer) = self.selected_customer() {
                    self.navigate(Route::CustomerDetails(customer.customer_id));
                }
            }
            KeyCode::Char('s') => self.navigate(Route::SearchCustomer),
            KeyCode::Char('a') => self.navigate(Route::AddCustomer),
            KeyCode::Char('e') => {
                let id = self.selected_customer().map(|c| c.customer_id);
                self.navigate(Route::EditCustomer(id));
            }
            KeyCode::Char('d') => {
                let id = self.selected_customer().map(|c| c.customer_id);
                self.navigate(Route::DeleteCustomer(id));
            }
            _ => return false,
        }

        true
    }
}

impl ComponentRender<RenderProps> for CustomersPage {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(props.area);

        if let Some(status) = &self.status {
            frame.render_widget(Paragraph::new(status.clone()), layout[0]);
        }

        let rows = self.visible().iter().map(|customer| {
            Row::new(vec![
                customer.customer_id.to_string(),
                customer.full_name(),
                customer.email.clone().unwrap_or_default(),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Percentage(35),
                Constraint::Percentage(50),
            ],
        )
        .header(
            Row::new(vec!["Customer_id", "Name", "Email"])
                .style(Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        )
        .row_highlight_style(Style::new().fg(Color::Black).bg(Color::Cyan))
        .highlight_symbol("> ")
        .block(
            Block::default()
                .title("Customer Details")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(props.border_color)),
        );
        let mut table_state = TableState::default().with_selected(match self.visible().is_empty() {
            true => None,
            false => Some(self.selected),
        });
        frame.render_stateful_widget(table, layout[1], &mut table_state);

        let pages: Vec<Span> = (1..=self.pages())
            .map(|page| match page == self.page {
                true => Span::styled(
                    format!(" {page} "),
                    Style::new().fg(Color::Black).bg(Color::Blue),
                ),
                false => Span::styled(format!(" {page} "), Style::new().fg(Color::Gray)),
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(pages)), layout[2]);
    }
}
