use std::sync::Arc;

use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::{Constraint, Direction, Layout};

use actions::collab::{ExecutionEnv, HttpWorkspaceApi, UiIntent, WorkspaceApi};
use actions::command_bar::{PaletteItem, SelectOutcome};
use actions::context::VisibilityContext;
use actions::dispatch::Dispatcher;
use actions::pages::PageGraph;
use actions::registry::{ActionId, ActionRegistry};
use actions::shortcuts;

use crate::bridge::{self, BridgeReceivers};
use crate::input::{AppAction, EventStream, extract_key_event, key_to_action};
use crate::state::{AppState, StaleSet, UiMode};
use crate::terminal::Terminal;
use crate::ui;

pub struct App {
    state: AppState,
    registry: ActionRegistry,
    pages: PageGraph,
    api: Arc<HttpWorkspaceApi>,
    cache: Arc<StaleSet>,
    dispatcher: Arc<Dispatcher>,
    events: EventStream,
    rx: BridgeReceivers,
    port: u16,
}

impl App {
    pub async fn new(port: u16) -> Result<Self> {
        actions::self_check()?;

        let registry = ActionRegistry::builtin();
        let pages = PageGraph::builtin();

        let api = Arc::new(HttpWorkspaceApi::new(port));
        let cache = Arc::new(StaleSet::default());
        let (confirm, errors, intents, rx) = bridge::channels();
        let env = ExecutionEnv {
            api: api.clone(),
            cache: cache.clone(),
            confirm: Arc::new(confirm),
            errors: Arc::new(errors),
            intents: Arc::new(intents),
        };
        let dispatcher = Arc::new(Dispatcher::new(registry, env));

        let mut state = AppState::new();

        // Verify connection and load initial data
        api.health_check().await?;
        state.backend_connected = true;
        let workspaces = api.list_workspaces().await?;
        state.workspaces.set_workspaces(workspaces);

        let ctx = VisibilityContext::build(&state.layout, &state.workspaces, &state.diffs);
        let conflicts = shortcuts::conflicts(&registry, &ctx);
        if !conflicts.is_empty() {
            anyhow::bail!("conflicting shortcuts in catalog: {conflicts:?}");
        }

        Ok(Self {
            state,
            registry,
            pages,
            api,
            cache,
            dispatcher,
            events: EventStream::new(),
            rx,
            port,
        })
    }

    pub async fn run(&mut self, terminal: &mut Terminal) -> Result<()> {
        loop {
            self.drain_bridges();
            self.refresh_if_stale().await;

            self.render(terminal)?;

            if let Some(event) = self.events.next().await? {
                self.handle_event(event);
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn visibility(&self) -> VisibilityContext {
        VisibilityContext::build(&self.state.layout, &self.state.workspaces, &self.state.diffs)
    }

    /// Apply everything running actions sent since the last tick.
    fn drain_bridges(&mut self) {
        while let Ok(intent) = self.rx.intents.try_recv() {
            self.apply_intent(intent);
        }
        while let Ok(message) = self.rx.errors.try_recv() {
            self.state.status = Some(message);
        }
        while let Ok(pending) = self.rx.confirms.try_recv() {
            // A newer confirmation replaces an unanswered one; the dropped
            // reply reads as a cancel on the requesting side.
            self.state.pending_confirm = Some(pending);
            self.state.mode = UiMode::Confirm;
        }
    }

    fn apply_intent(&mut self, intent: UiIntent) {
        match intent {
            UiIntent::ToggleSidebar => {
                self.state.layout.sidebar_open = !self.state.layout.sidebar_open;
            }
            UiIntent::SetDiffViewMode(mode) => {
                self.state.diffs.view_mode = mode;
            }
            UiIntent::CollapseAllDiffs => {
                self.state.diffs.collapse_all();
            }
            UiIntent::ExpandAllDiffs => {
                self.state.diffs.expand_all();
            }
            UiIntent::OpenCommandBar => {
                self.open_palette();
            }
            UiIntent::OpenSettings => {
                let url = format!("http://127.0.0.1:{}/settings", self.port);
                if let Err(err) = open::that_detached(&url) {
                    tracing::warn!("failed to open {url}: {err}");
                    self.state.status = Some("Could not open settings in browser".to_string());
                }
            }
        }
    }

    async fn refresh_if_stale(&mut self) {
        if !self.cache.take("workspaces") {
            return;
        }
        match self.api.list_workspaces().await {
            Ok(workspaces) => {
                self.state.backend_connected = true;
                self.state.workspaces.set_workspaces(workspaces);
            }
            Err(err) => {
                tracing::error!("workspace refresh failed: {err}");
                self.state.backend_connected = false;
                self.state.status = Some(err.message);
            }
        }
    }

    fn render(&mut self, terminal: &mut Terminal) -> Result<()> {
        let ctx = self.visibility();
        let state = &self.state;
        let registry = &self.registry;
        let pages = &self.pages;

        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(2), // Navbar
                    Constraint::Min(0),    // Main content
                    Constraint::Length(2), // Footer
                ])
                .split(frame.area());

            ui::render_navbar(frame, chunks[0], registry, &ctx, state);

            if state.layout.sidebar_open {
                let main = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
                    .split(chunks[1]);
                ui::render_workspace_list(frame, main[0], state);
                ui::render_workspace_detail(frame, main[1], state);
            } else {
                ui::render_workspace_detail(frame, chunks[1], state);
            }

            ui::render_footer(frame, chunks[2], state);

            match state.mode {
                UiMode::Palette => {
                    ui::render_palette(frame, frame.area(), state, pages, registry, &ctx);
                }
                UiMode::ContextMenu => {
                    ui::render_context_menu(frame, frame.area(), state, pages, registry, &ctx);
                }
                UiMode::Confirm => {
                    if let Some(pending) = &state.pending_confirm {
                        ui::render_confirm(frame, frame.area(), &pending.request);
                    }
                }
                UiMode::Board => {}
            }
        })?;

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Some(key) = extract_key_event(event) else {
            return;
        };
        let Some(action) = key_to_action(key, self.state.mode) else {
            return;
        };

        match self.state.mode {
            UiMode::Board => self.handle_board_action(action),
            UiMode::Palette => self.handle_palette_action(action),
            UiMode::ContextMenu => self.handle_menu_action(action),
            UiMode::Confirm => self.handle_confirm_action(action),
        }
    }

    fn handle_board_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit => {
                self.state.should_quit = true;
            }
            AppAction::Down => {
                self.state.workspaces.select_next();
            }
            AppAction::Up => {
                self.state.workspaces.select_prev();
            }
            AppAction::OpenMenu => {
                if self.state.workspaces.selected().is_some() {
                    self.state.menu_cursor = 0;
                    self.state.mode = UiMode::ContextMenu;
                } else {
                    self.state.status = Some("No workspace selected".to_string());
                }
            }
            AppAction::OpenPalette => {
                self.open_palette();
            }
            AppAction::Refresh => {
                self.cache.mark("workspaces");
            }
            AppAction::Chord(c) => {
                self.handle_chord(c);
            }
            _ => {}
        }
    }

    fn open_palette(&mut self) {
        self.state.palette.reset();
        self.state.palette_cursor = 0;
        self.state.mode = UiMode::Palette;
    }

    fn handle_chord(&mut self, c: char) {
        let ctx = self.visibility();
        let chord = c.to_string();
        let Some(binding) = shortcuts::bindings(&self.registry, &ctx)
            .into_iter()
            .find(|b| b.chord == chord)
        else {
            return;
        };
        let action = self.registry.get(binding.action);
        if !action.is_enabled(&ctx) {
            let label = action.resolve_label(self.state.workspaces.selected());
            self.state.status = Some(format!("{label} is unavailable right now"));
            return;
        }
        self.dispatch(binding.action, ctx);
    }

    fn handle_palette_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit => {
                self.state.should_quit = true;
            }
            AppAction::Close => {
                self.state.mode = UiMode::Board;
            }
            AppAction::Up => {
                self.state.palette_cursor = self.state.palette_cursor.saturating_sub(1);
            }
            AppAction::Down => {
                let rows = self.palette_rows();
                if self.state.palette_cursor + 1 < rows.len() {
                    self.state.palette_cursor += 1;
                }
            }
            AppAction::TypeChar(c) => {
                self.state.palette.type_char(c);
                self.state.palette_cursor = 0;
            }
            AppAction::Backspace => {
                self.state.palette.backspace();
                self.state.palette_cursor = 0;
            }
            AppAction::Select => {
                let ctx = self.visibility();
                let rows = self.palette_rows();
                let Some(item) = rows.get(self.state.palette_cursor).copied() else {
                    return;
                };
                if let PaletteItem::Action(id) = item
                    && !self.registry.get(id).is_enabled(&ctx)
                {
                    let label = self
                        .registry
                        .get(id)
                        .resolve_label(self.state.workspaces.selected());
                    self.state.status = Some(format!("{label} is unavailable right now"));
                    return;
                }
                match self.state.palette.select(item) {
                    SelectOutcome::Invoke(id) => {
                        self.state.mode = UiMode::Board;
                        self.dispatch(id, ctx);
                    }
                    SelectOutcome::Navigated | SelectOutcome::Back => {
                        self.state.palette_cursor = 0;
                    }
                }
            }
            _ => {}
        }
    }

    fn palette_rows(&self) -> Vec<PaletteItem> {
        let ctx = self.visibility();
        let groups = self.state.palette.visible_groups(
            &self.pages,
            &self.registry,
            &ctx,
            self.state.workspaces.selected(),
        );
        ui::flat_rows(&groups)
    }

    fn handle_menu_action(&mut self, action: AppAction) {
        let ctx = self.visibility();
        let rows = ui::context_menu_actions(&self.pages, &self.registry, &ctx);
        match action {
            AppAction::Quit => {
                self.state.should_quit = true;
            }
            AppAction::Close => {
                self.state.mode = UiMode::Board;
            }
            AppAction::Up => {
                self.state.menu_cursor = self.state.menu_cursor.saturating_sub(1);
            }
            AppAction::Down => {
                if self.state.menu_cursor + 1 < rows.len() {
                    self.state.menu_cursor += 1;
                }
            }
            AppAction::Select => {
                let Some(id) = rows.get(self.state.menu_cursor).copied() else {
                    return;
                };
                let action = self.registry.get(id);
                if !action.is_enabled(&ctx) {
                    let label = action.resolve_label(self.state.workspaces.selected());
                    self.state.status = Some(format!("{label} is unavailable right now"));
                    return;
                }
                self.state.mode = UiMode::Board;
                self.dispatch(id, ctx);
            }
            _ => {}
        }
    }

    fn handle_confirm_action(&mut self, action: AppAction) {
        use actions::collab::Confirmation;

        let answer = match action {
            AppAction::Confirm => Confirmation::Confirmed,
            AppAction::Cancel => Confirmation::Cancelled,
            AppAction::Quit => {
                self.state.should_quit = true;
                Confirmation::Cancelled
            }
            _ => return,
        };
        if let Some(pending) = self.state.pending_confirm.take() {
            let _ = pending.reply.send(answer);
        }
        self.state.mode = UiMode::Board;
    }

    /// Fire an action on its own task so the event loop keeps running; a
    /// confirmation the action asks for is answered from this loop.
    fn dispatch(&mut self, id: ActionId, ctx: VisibilityContext) {
        self.state.status = None;
        let subject = self.state.workspaces.selected_id;
        let dispatcher = self.dispatcher.clone();
        let error_tx = self.rx.error_tx.clone();
        tokio::spawn(async move {
            if let Err(err) = dispatcher.execute(id, &ctx, subject).await {
                tracing::error!(action = id.as_str(), "dispatch failed: {err}");
                let _ = error_tx.send(err.to_string());
            }
        });
    }
}
