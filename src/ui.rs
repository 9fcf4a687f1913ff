use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use tracing::{debug, info};

use pocket_ledger::format::{format_currency, format_datetime, format_relative};
use pocket_ledger::{
    Clock, CreateWalletInput, DateRange, EventStatus, Ledger, RecordTransactionInput,
    TransactionDirection, TransactionFilter, WalletColor, WalletSelector, WalletType,
};

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Transactions,
    Categories,
    Events,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Overview => Page::Transactions,
            Page::Transactions => Page::Categories,
            Page::Categories => Page::Events,
            Page::Events => Page::Overview,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Overview => Page::Events,
            Page::Transactions => Page::Overview,
            Page::Categories => Page::Transactions,
            Page::Events => Page::Categories,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Overview => "Overview",
            Page::Transactions => "Transactions",
            Page::Categories => "Categories",
            Page::Events => "Events",
        }
    }
}

/// What keystrokes currently go to
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Search,
    TransactionForm(TransactionDraft),
    WalletForm(WalletDraft),
}

// ============================================================================
// FORM DRAFTS (caller-owned view state, never part of the ledger)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub wallet_id: Option<String>,
    pub direction: TransactionDirection,
    pub amount: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub date: String,
    pub description: String,
    pub location: String,
    pub focus: usize,
}

impl TransactionDraft {
    pub const FIELDS: [&'static str; 8] = [
        "Wallet",
        "Type",
        "Amount",
        "Category",
        "Subcategory",
        "Date",
        "Note",
        "Location (JSON)",
    ];

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            2 => Some(&mut self.amount),
            5 => Some(&mut self.date),
            6 => Some(&mut self.description),
            7 => Some(&mut self.location),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalletDraft {
    pub name: String,
    pub balance: String,
    pub wallet_type: WalletType,
    pub focus: usize,
}

impl WalletDraft {
    pub const FIELDS: [&'static str; 3] = ["Name", "Opening balance", "Type"];

    fn new() -> Self {
        WalletDraft {
            name: String::new(),
            balance: String::new(),
            wallet_type: WalletType::Cash,
            focus: 0,
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.name),
            1 => Some(&mut self.balance),
            _ => None,
        }
    }
}

// ============================================================================
// APP
// ============================================================================

pub struct App<C: Clock> {
    pub ledger: Ledger<C>,
    pub filter: TransactionFilter,
    pub state: TableState,
    pub current_page: Page,
    pub mode: Mode,
    pub show_detail: bool,
    pub toast: Option<String>,
    pub error: Option<String>,
    /// Wallet the next transaction form starts on
    last_wallet_id: Option<String>,
}

impl<C: Clock> App<C> {
    pub fn new(ledger: Ledger<C>, default_range: DateRange) -> Self {
        let last_wallet_id = ledger.wallets().first().map(|w| w.id.clone());
        let mut app = Self {
            ledger,
            filter: TransactionFilter::default().with_range(default_range),
            state: TableState::default(),
            current_page: Page::Overview,
            mode: Mode::Normal,
            show_detail: false,
            toast: None,
            error: None,
            last_wallet_id,
        };
        app.reset_selection();
        app
    }

    pub fn visible_count(&self) -> usize {
        self.ledger.query_transactions(&self.filter).len()
    }

    fn reset_selection(&mut self) {
        if self.visible_count() > 0 {
            self.state.select(Some(0));
        } else {
            self.state.select(None);
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    // ------------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------------

    /// All → first wallet → ... → last wallet → All
    pub fn cycle_wallet_filter(&mut self) {
        let wallets = self.ledger.wallets();
        self.filter.wallet = match &self.filter.wallet {
            WalletSelector::All => wallets
                .first()
                .map(|w| WalletSelector::Wallet(w.id.clone()))
                .unwrap_or(WalletSelector::All),
            WalletSelector::Wallet(id) => {
                let pos = wallets.iter().position(|w| &w.id == id);
                match pos.and_then(|i| wallets.get(i + 1)) {
                    Some(next) => WalletSelector::Wallet(next.id.clone()),
                    None => WalletSelector::All,
                }
            }
        };
        self.reset_selection();
    }

    pub fn cycle_direction_filter(&mut self) {
        self.filter.direction = self.filter.direction.next();
        self.reset_selection();
    }

    pub fn cycle_date_range(&mut self) {
        self.filter.range = self.filter.range.next();
        self.reset_selection();
    }

    pub fn clear_filter(&mut self) {
        self.filter = TransactionFilter::all();
        self.reset_selection();
    }

    fn wallet_filter_label(&self) -> String {
        match &self.filter.wallet {
            WalletSelector::All => "All wallets".to_string(),
            WalletSelector::Wallet(id) => self
                .ledger
                .wallet(id)
                .map(|w| w.name.clone())
                .unwrap_or_else(|| id.clone()),
        }
    }

    // ------------------------------------------------------------------------
    // Forms
    // ------------------------------------------------------------------------

    pub fn open_transaction_form(&mut self) {
        let now = self.ledger.now();
        let direction = TransactionDirection::Expense;
        let category = self.ledger.categories().by_direction(direction).first().copied();
        let draft = TransactionDraft {
            wallet_id: self
                .last_wallet_id
                .clone()
                .or_else(|| self.ledger.wallets().first().map(|w| w.id.clone())),
            direction,
            amount: String::new(),
            category_id: category.map(|c| c.id.clone()).unwrap_or_default(),
            subcategory_id: category.and_then(|c| c.first_child()).map(|c| c.id.clone()),
            date: now.format(DATE_INPUT_FORMAT).to_string(),
            description: String::new(),
            location: String::new(),
            focus: 0,
        };
        self.error = None;
        self.mode = Mode::TransactionForm(draft);
    }

    pub fn open_wallet_form(&mut self) {
        self.error = None;
        self.mode = Mode::WalletForm(WalletDraft::new());
    }

    /// Rotate a picker field of the transaction form
    fn cycle_transaction_field(&self, draft: &mut TransactionDraft) {
        let categories = self.ledger.categories();
        match draft.focus {
            0 => {
                let wallets = self.ledger.wallets();
                let pos = draft
                    .wallet_id
                    .as_ref()
                    .and_then(|id| wallets.iter().position(|w| &w.id == id));
                let next = match pos {
                    Some(i) => wallets.get((i + 1) % wallets.len()),
                    None => wallets.first(),
                };
                draft.wallet_id = next.map(|w| w.id.clone());
            }
            1 => {
                draft.direction = draft.direction.toggle();
                let first = categories.by_direction(draft.direction).first().copied();
                draft.category_id = first.map(|c| c.id.clone()).unwrap_or_default();
                draft.subcategory_id = first.and_then(|c| c.first_child()).map(|c| c.id.clone());
            }
            3 => {
                let options = categories.by_direction(draft.direction);
                if options.is_empty() {
                    return;
                }
                let pos = options.iter().position(|c| c.id == draft.category_id);
                let next = options[pos.map(|i| (i + 1) % options.len()).unwrap_or(0)];
                draft.category_id = next.id.clone();
                draft.subcategory_id = next.first_child().map(|c| c.id.clone());
            }
            4 => {
                // children..., then "none"
                let Some(category) = categories.find_by_id(&draft.category_id) else {
                    return;
                };
                let pos = draft
                    .subcategory_id
                    .as_ref()
                    .and_then(|id| category.children.iter().position(|c| &c.id == id));
                draft.subcategory_id = match pos {
                    Some(i) => category.children.get(i + 1).map(|c| c.id.clone()),
                    None => category.first_child().map(|c| c.id.clone()),
                };
            }
            _ => {}
        }
    }

    /// Submit the transaction form; on success the form closes
    pub fn submit_transaction(&mut self, draft: &TransactionDraft) -> bool {
        let now = self.ledger.now();
        let timestamp = match parse_local_datetime(&draft.date, now.offset()) {
            Some(ts) => ts,
            None => {
                self.error = Some(format!(
                    "invalid date: {:?}, expected YYYY-MM-DD HH:MM",
                    draft.date
                ));
                return false;
            }
        };

        let input = RecordTransactionInput {
            wallet_id: draft.wallet_id.clone(),
            amount: draft.amount.clone(),
            category_id: draft.category_id.clone(),
            subcategory_id: draft.subcategory_id.clone(),
            direction: draft.direction,
            timestamp,
            description: draft.description.clone(),
            location: Some(draft.location.clone()),
        };

        match self.ledger.record_transaction(input) {
            Ok(tx) => {
                debug!(tx_id = %tx.id, "Transaction form submitted");
                self.last_wallet_id = draft.wallet_id.clone();
                self.error = None;
                self.toast = Some("Transaction recorded and wallet balance synced".to_string());
                self.reset_selection();
                true
            }
            Err(err) => {
                self.error = Some(err.to_string());
                false
            }
        }
    }

    /// Submit the wallet form; the new wallet becomes the active filter
    pub fn submit_wallet(&mut self, draft: &WalletDraft) -> bool {
        let input = CreateWalletInput {
            name: draft.name.clone(),
            balance: draft.balance.clone(),
            wallet_type: draft.wallet_type,
        };

        match self.ledger.create_wallet(input) {
            Ok(wallet) => {
                let wallet = wallet.clone();
                self.filter.focus_wallet(&wallet);
                self.last_wallet_id = Some(wallet.id.clone());
                self.error = None;
                self.toast = Some(format!("Wallet {} created", wallet.name));
                self.reset_selection();
                true
            }
            Err(err) => {
                self.error = Some(err.to_string());
                false
            }
        }
    }

    // ------------------------------------------------------------------------
    // Key handling
    // ------------------------------------------------------------------------

    /// Returns false when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let mode = std::mem::replace(&mut self.mode, Mode::Normal);
        match mode {
            Mode::Normal => return self.handle_normal_key(key),
            Mode::Search => {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter => {}
                    KeyCode::Backspace => {
                        self.filter.search.pop();
                        self.mode = Mode::Search;
                    }
                    KeyCode::Char(c) => {
                        self.filter.search.push(c);
                        self.mode = Mode::Search;
                    }
                    _ => self.mode = Mode::Search,
                }
                self.reset_selection();
            }
            Mode::TransactionForm(mut draft) => {
                let count = TransactionDraft::FIELDS.len();
                match key.code {
                    KeyCode::Esc => return true,
                    KeyCode::Enter => {
                        if self.submit_transaction(&draft) {
                            return true;
                        }
                    }
                    KeyCode::Tab | KeyCode::Down => draft.focus = (draft.focus + 1) % count,
                    KeyCode::BackTab | KeyCode::Up => draft.focus = (draft.focus + count - 1) % count,
                    KeyCode::Backspace => {
                        if let Some(text) = draft.text_mut() {
                            text.pop();
                        }
                    }
                    KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if draft.text_mut().is_none() => {
                        self.cycle_transaction_field(&mut draft);
                    }
                    KeyCode::Char(c) => {
                        if let Some(text) = draft.text_mut() {
                            text.push(c);
                        }
                    }
                    _ => {}
                }
                self.mode = Mode::TransactionForm(draft);
            }
            Mode::WalletForm(mut draft) => {
                let count = WalletDraft::FIELDS.len();
                match key.code {
                    KeyCode::Esc => return true,
                    KeyCode::Enter => {
                        if self.submit_wallet(&draft) {
                            return true;
                        }
                    }
                    KeyCode::Tab | KeyCode::Down => draft.focus = (draft.focus + 1) % count,
                    KeyCode::BackTab | KeyCode::Up => draft.focus = (draft.focus + count - 1) % count,
                    KeyCode::Backspace => {
                        if let Some(text) = draft.text_mut() {
                            text.pop();
                        }
                    }
                    KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if draft.focus == 2 => {
                        draft.wallet_type = draft.wallet_type.next();
                    }
                    KeyCode::Char(c) => {
                        if let Some(text) = draft.text_mut() {
                            text.push(c);
                        }
                    }
                    _ => {}
                }
                self.mode = Mode::WalletForm(draft);
            }
        }
        true
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        self.toast = None;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.previous_page();
                } else {
                    self.next_page();
                }
            }
            KeyCode::BackTab => self.previous_page(),
            KeyCode::Char('n') => self.open_transaction_form(),
            KeyCode::Char('a') => self.open_wallet_form(),
            KeyCode::Char('/') => {
                self.current_page = Page::Transactions;
                self.mode = Mode::Search;
            }
            KeyCode::Char('w') => self.cycle_wallet_filter(),
            KeyCode::Char('t') => self.cycle_direction_filter(),
            KeyCode::Char('d') => self.cycle_date_range(),
            KeyCode::Char('c') => self.clear_filter(),
            KeyCode::Enter if self.current_page == Page::Transactions => self.toggle_detail(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Home => self.reset_selection(),
            _ => {}
        }
        true
    }

    pub fn next(&mut self) {
        let len = self.visible_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }
}

/// "2024-06-18 08:15" in the viewer's offset
pub fn parse_local_datetime(text: &str, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), DATE_INPUT_FORMAT).ok()?;
    offset.from_local_datetime(&naive).single()
}

// ============================================================================
// TERMINAL LOOP
// ============================================================================

pub fn run_ui<C: Clock>(app: &mut App<C>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
) -> Result<()> {
    info!("UI started");
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if !app.handle_key(key) {
                info!("UI closed");
                return Ok(());
            }
        }
    }
}

fn ui<C: Clock>(f: &mut Frame, app: &mut App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Overview => render_overview(f, chunks[1], app),
        Page::Transactions => {
            if app.show_detail {
                let content_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .split(chunks[1]);
                render_transactions(f, content_chunks[0], app);
                render_detail_panel(f, content_chunks[1], app);
            } else {
                render_transactions(f, chunks[1], app);
            }
        }
        Page::Categories => render_categories(f, chunks[1], app),
        Page::Events => render_events(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);

    match &app.mode {
        Mode::TransactionForm(draft) => render_transaction_form(f, app, draft),
        Mode::WalletForm(draft) => render_wallet_form(f, draft),
        _ => {}
    }
}

fn label_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn header_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn direction_color(direction: TransactionDirection) -> Color {
    match direction {
        TransactionDirection::Expense => Color::Red,
        TransactionDirection::Income => Color::Green,
    }
}

fn wallet_color(color: WalletColor) -> Color {
    match color {
        WalletColor::Amber => Color::Rgb(251, 191, 36),
        WalletColor::Sky => Color::Rgb(14, 165, 233),
        WalletColor::Violet => Color::Rgb(139, 92, 246),
        WalletColor::Emerald => Color::Rgb(16, 185, 129),
        WalletColor::Rose => Color::Rgb(244, 63, 94),
        WalletColor::Cyan => Color::Rgb(6, 182, 212),
        WalletColor::Lime => Color::Rgb(132, 204, 22),
    }
}

fn render_header<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let stats = app.ledger.compute_statistics();
    let pages = [Page::Overview, Page::Transactions, Page::Categories, Page::Events];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Net worth: {}", format_currency(stats.total_balance)),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_overview<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let stats = app.ledger.compute_statistics();
    let totals = vec![
        Line::from(vec![
            Span::styled("  Total balance:  ", label_style()),
            Span::styled(format_currency(stats.total_balance), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("  7-day expense:  ", label_style()),
            Span::styled(format_currency(stats.weekly_expense), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled("  7-day income:   ", label_style()),
            Span::styled(format_currency(stats.weekly_income), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("  Month expense:  ", label_style()),
            Span::styled(format_currency(stats.month_expense), Style::default().fg(Color::Red)),
        ]),
    ];
    f.render_widget(
        Paragraph::new(totals).block(Block::default().borders(Borders::ALL).title(" Summary ")),
        chunks[0],
    );

    let now = app.ledger.now();
    let header = Row::new(
        ["Wallet", "Type", "Balance", "Txs", "In", "Out", "Net", "Synced"]
            .iter()
            .map(|h| Cell::from(*h).style(header_style())),
    )
    .style(Style::default().bg(Color::DarkGray));

    let summaries = app.ledger.wallet_summaries();
    let rows = app.ledger.wallets().iter().zip(summaries.iter()).map(|(wallet, summary)| {
        Row::new(vec![
            Cell::from(wallet.name.clone()).style(Style::default().fg(wallet_color(wallet.color))),
            Cell::from(wallet.wallet_type.as_str()),
            Cell::from(if summary.overdrawn {
                format!("{} !", format_currency(wallet.balance))
            } else {
                format_currency(wallet.balance)
            })
            .style(if summary.overdrawn {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }),
            Cell::from(summary.transaction_count.to_string()),
            Cell::from(format_currency(summary.total_income)).style(Style::default().fg(Color::Green)),
            Cell::from(format_currency(summary.total_expense)).style(Style::default().fg(Color::Red)),
            Cell::from(format_currency(summary.net_flow())),
            Cell::from(format_relative(wallet.last_synced_at, now)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Length(11),
            Constraint::Length(16),
            Constraint::Length(5),
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Wallets "));

    f.render_widget(table, chunks[1]);
}

fn render_transactions<C: Clock>(f: &mut Frame, area: Rect, app: &mut App<C>) {
    let offset = *app.ledger.now().offset();
    let header = Row::new(
        ["Date", "Wallet", "Category", "Note", "Amount"]
            .iter()
            .map(|h| Cell::from(*h).style(header_style())),
    )
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let ledger = &app.ledger;
    let rows: Vec<Row> = ledger
        .query_transactions(&app.filter)
        .into_iter()
        .map(|tx| {
            let color = direction_color(tx.direction);
            let wallet_name = ledger.wallet(&tx.wallet_id).map(|w| w.name.clone()).unwrap_or_default();
            Row::new(vec![
                Cell::from(format_datetime(tx.timestamp, &offset)),
                Cell::from(truncate(&wallet_name, 18)),
                Cell::from(truncate(&ledger.category_path(tx), 28)),
                Cell::from(truncate(&tx.description, 30)),
                Cell::from(format_currency(tx.signed_amount())).style(Style::default().fg(color)),
            ])
        })
        .collect();

    let title = format!(
        " Transactions · {} · {} · {}{} ",
        app.wallet_filter_label(),
        app.filter.direction.label(),
        app.filter.range.label(),
        if app.filter.search.is_empty() {
            String::new()
        } else {
            format!(" · \"{}\"", app.filter.search)
        }
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(20),
            Constraint::Length(30),
            Constraint::Length(32),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_detail_panel<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Transaction Details ");

    let visible = app.ledger.query_transactions(&app.filter);
    let Some(tx) = app.state.selected().and_then(|i| visible.get(i).copied()) else {
        f.render_widget(Paragraph::new("No transaction selected").block(block), area);
        return;
    };

    let wallet_name = app.ledger.wallet(&tx.wallet_id).map(|w| w.name.clone()).unwrap_or_default();
    let field = |label: &str, value: String| {
        Line::from(vec![Span::styled(format!("  {}: ", label), label_style()), Span::raw(value)])
    };

    let content = vec![
        Line::from(""),
        field("Date", tx.timestamp.to_rfc3339()),
        field("Wallet", wallet_name),
        field("Category", app.ledger.category_path(tx)),
        Line::from(vec![
            Span::styled("  Amount: ", label_style()),
            Span::styled(
                format_currency(tx.signed_amount()),
                Style::default().fg(direction_color(tx.direction)),
            ),
        ]),
        field("Type", tx.direction.as_str().to_string()),
        field("Location", tx.location.clone().unwrap_or_else(|| "-".to_string())),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(vec![Span::raw("  "), Span::styled(
            wrap_text(&tx.description, 35),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )]),
        Line::from(""),
        field("Id", tx.id.clone()),
    ];

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn render_categories<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let mut lines = vec![Line::from("")];
    for category in app.ledger.categories().all_categories() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", category.name), label_style()),
            Span::styled(
                format!("  ({})", category.direction.as_str()),
                Style::default().fg(direction_color(category.direction)),
            ),
        ]));
        for (i, child) in category.children.iter().enumerate() {
            let branch = if i + 1 == category.children.len() { "└─" } else { "├─" };
            lines.push(Line::from(format!("    {} {}", branch, child.name)));
        }
    }

    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Categories ")),
        area,
    );
}

fn render_events<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let now = app.ledger.now();
    let rows = app.ledger.events().iter().map(|event| {
        let color = match event.status {
            EventStatus::Success => Color::Green,
            EventStatus::Pending => Color::Yellow,
            EventStatus::Info => Color::Cyan,
        };
        Row::new(vec![
            Cell::from(event.status.as_str()).style(Style::default().fg(color)),
            Cell::from(event.title.clone()),
            Cell::from(event.source.as_str()),
            Cell::from(truncate(&event.description, 60)),
            Cell::from(format_relative(event.time, now)),
        ])
    });

    let header = Row::new(
        ["Status", "Event", "Source", "Detail", "When"]
            .iter()
            .map(|h| Cell::from(*h).style(header_style())),
    )
    .style(Style::default().bg(Color::DarkGray));

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Min(20),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Event Feed "));

    f.render_widget(table, area);
}

fn render_status_bar<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let mut status_spans = vec![];

    if let Some(error) = &app.error {
        status_spans.push(Span::styled(format!(" {} ", error), Style::default().fg(Color::Red)));
    } else if let Some(toast) = &app.toast {
        status_spans.push(Span::styled(format!(" {} ", toast), Style::default().fg(Color::Green)));
    } else if app.mode == Mode::Search {
        status_spans.push(Span::styled(
            format!(" Search: {}_ ", app.filter.search),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        let hints = [
            ("n", "New tx"),
            ("a", "Add wallet"),
            ("w/t/d", "Filters"),
            ("/", "Search"),
            ("c", "Clear"),
            ("Tab", "Page"),
            ("q", "Quit"),
        ];
        for (i, (key, what)) in hints.iter().enumerate() {
            if i > 0 {
                status_spans.push(Span::raw(" | "));
            }
            status_spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(format!(" {}", what)));
        }
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::White)));

    f.render_widget(status_bar, area);
}

fn render_transaction_form<C: Clock>(f: &mut Frame, app: &App<C>, draft: &TransactionDraft) {
    let categories = app.ledger.categories();
    let wallet = draft
        .wallet_id
        .as_deref()
        .and_then(|id| app.ledger.wallet(id))
        .map(|w| format!("{} ({})", w.name, format_currency(w.balance)))
        .unwrap_or_else(|| "-".to_string());
    let category = categories
        .find_by_id(&draft.category_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "-".to_string());
    let subcategory = draft
        .subcategory_id
        .as_deref()
        .and_then(|id| categories.find_subcategory(id))
        .map(|(_, c)| c.name.clone())
        .unwrap_or_else(|| "(none)".to_string());

    let values = [
        wallet,
        draft.direction.as_str().to_string(),
        draft.amount.clone(),
        category,
        subcategory,
        draft.date.clone(),
        draft.description.clone(),
        draft.location.clone(),
    ];

    render_form(f, " New transaction ", &TransactionDraft::FIELDS, &values, draft.focus);
}

fn render_wallet_form(f: &mut Frame, draft: &WalletDraft) {
    let values = [
        draft.name.clone(),
        draft.balance.clone(),
        draft.wallet_type.as_str().to_string(),
    ];
    render_form(f, " New wallet ", &WalletDraft::FIELDS, &values, draft.focus);
}

fn render_form(f: &mut Frame, title: &str, labels: &[&str], values: &[String], focus: usize) {
    let height = labels.len() as u16 + 4;
    let area = centered_rect(60, height, f.size());

    let mut lines: Vec<Line> = labels
        .iter()
        .zip(values.iter())
        .enumerate()
        .map(|(i, (label, value))| {
            let marker = if i == focus { "→ " } else { "  " };
            let value_style = if i == focus {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{:<16}", label), label_style()),
                Span::styled(value.clone(), value_style),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Enter save · Esc cancel · Tab next · ←/→ change",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(title.to_string()),
        ),
        area,
    );
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let width = r.width * percent_x / 100;
    Rect {
        x: r.x + (r.width.saturating_sub(width)) / 2,
        y: r.y + (r.height.saturating_sub(height)) / 2,
        width,
        height: height.min(r.height),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() || current_line.len() + word.len() < width {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        } else {
            if !result.is_empty() {
                result.push_str("\n  ");
            }
            result.push_str(&current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        if !result.is_empty() {
            result.push_str("\n  ");
        }
        result.push_str(&current_line);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use pocket_ledger::seed::sample_data;
    use pocket_ledger::FixedClock;

    fn app() -> App<FixedClock> {
        let clock = FixedClock::at("2024-06-18T09:00:00+07:00").unwrap();
        let seed = sample_data(clock.now());
        App::new(Ledger::with_clock(clock).with_seed(seed), DateRange::AllTime)
    }

    fn press(app: &mut App<FixedClock>, code: KeyCode) -> bool {
        app.handle_key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn type_text(app: &mut App<FixedClock>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_page_cycle() {
        assert_eq!(Page::Events.next(), Page::Overview);
        assert_eq!(Page::Overview.previous(), Page::Events);
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_wallet_filter_cycles_back_to_all() {
        let mut app = app();
        for _ in 0..app.ledger.wallets().len() {
            app.cycle_wallet_filter();
            assert!(matches!(app.filter.wallet, WalletSelector::Wallet(_)));
        }
        app.cycle_wallet_filter();
        assert_eq!(app.filter.wallet, WalletSelector::All);
    }

    #[test]
    fn test_search_mode_edits_filter() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "momo");
        assert_eq!(app.visible_count(), 2);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.filter.search, "momo");
    }

    #[test]
    fn test_transaction_form_submits() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        assert!(matches!(app.mode, Mode::TransactionForm(_)));

        // wallet → type → amount
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "50000");
        // → category → subcategory → date → note
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Water bill");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.error, None);
        assert_eq!(app.ledger.transactions().len(), 7);
        // first seed wallet is the cash wallet
        assert_eq!(app.ledger.wallet("wallet-cash").unwrap().balance, 1_200_000);
    }

    #[test]
    fn test_transaction_form_keeps_draft_on_error() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, Mode::TransactionForm(_)));
        assert!(app.error.as_deref().unwrap().starts_with("invalid amount"));
        assert_eq!(app.ledger.transactions().len(), 6);
    }

    #[test]
    fn test_direction_toggle_resets_category() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);

        let Mode::TransactionForm(draft) = &app.mode else {
            panic!("form closed");
        };
        assert_eq!(draft.direction, TransactionDirection::Income);
        assert_eq!(draft.category_id, "cat-salary");
        assert_eq!(draft.subcategory_id.as_deref(), Some("cat-salary-fixed"));
    }

    #[test]
    fn test_wallet_form_focuses_new_wallet() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Savings");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "0");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Normal);
        let newest = &app.ledger.wallets()[0];
        assert_eq!(newest.name, "Savings");
        assert_eq!(newest.balance, 0);
        assert_eq!(app.filter.wallet, WalletSelector::Wallet(newest.id.clone()));
        assert_eq!(app.visible_count(), 0);
    }

    #[test]
    fn test_parse_local_datetime() {
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        let ts = parse_local_datetime("2024-06-18 08:15", &offset).unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-06-18T08:15:00+07:00");
        assert!(parse_local_datetime("yesterday", &offset).is_none());
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Coffee & Tea", 20), "Coffee & Tea");
        assert_eq!(truncate("Cà phê cùng đối tác", 8), "Cà ph...");
    }
}
