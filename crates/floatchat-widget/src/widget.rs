#![forbid(unsafe_code)]

//! The widget core: one state machine tying the gesture recognizers, the
//! session, the connectivity monitor and persistence together.
//!
//! [`ChatWidget`] is synchronous and side-effect free toward the host: every
//! entry point takes the current time and a [`ViewportProvider`] and returns
//! the [`Effect`]s to apply. Persistence happens internally through the
//! injected [`KeyValueStore`]; network IO is delegated back to the host via
//! [`Effect::SendRequest`] and [`Effect::CheckHealth`].

use std::fmt;

use floatchat_geometry::{
    Boundaries, PercentPoint, Point, Rect, Size, active_resize_corner, edge_margin, from_percent,
    solve_panel_placement,
};
use floatchat_markdown::escape_html;
use web_time::Instant;

use crate::coalesce::ResizeCoalescer;
use crate::config::{ContextType, WidgetConfig, default_context_types};
use crate::drag::{DragContext, DragController};
use crate::event::{Effect, WidgetEvent};
use crate::i18n::{EnglishStrings, Translator, keys};
use crate::monitor::ConnectionMonitor;
use crate::page::PageInfo;
use crate::resize::{ResizeController, ResizeLimits};
use crate::session::{ChatSession, Role, StoredMessage, now_iso, now_ms};
use crate::storage::{KeyValueStore, load_json, store_json};
use crate::error::ChatError;
use crate::transport::{ChatRequest, ChatResponse, request_context};
use crate::viewport::ViewportProvider;

/// The floating chat widget.
pub struct ChatWidget<S: KeyValueStore> {
    config: WidgetConfig,
    page: PageInfo,
    store: S,
    session: ChatSession,
    drag: DragController,
    resize: ResizeController,
    coalescer: ResizeCoalescer,
    monitor: ConnectionMonitor,
    translator: Box<dyn Translator>,
    lang: String,
    open: bool,
    /// Durable anchor position, set once the user drags the toggle.
    anchor_percent: Option<PercentPoint>,
    panel_size: Size,
    context_types: Vec<ContextType>,
    selected_context: Option<ContextType>,
}

impl<S: KeyValueStore> ChatWidget<S> {
    /// Build the widget, restoring persisted state from `store`.
    pub fn new(config: WidgetConfig, mut store: S, page: PageInfo, now: Instant) -> Self {
        let session = ChatSession::load(&mut store, config.keys.clone(), config.limits.clone());
        let open = load_json(&store, &config.keys.open, false);
        let default_size =
            Size::new(config.dimensions.panel_width, config.dimensions.panel_height);
        let panel_size = load_json(&store, &config.keys.panel_size, default_size);
        let context_types = default_context_types();
        let selected_context = find_context(&context_types, "paper");

        tracing::info!(
            session_id = session.session_id(),
            open,
            page = %page.page_name,
            "chat widget initialized"
        );

        Self {
            drag: DragController::new(config.dimensions.drag_threshold, config.timing.drag_reset_delay),
            resize: ResizeController::new(),
            coalescer: ResizeCoalescer::new(config.timing.resize_debounce),
            monitor: ConnectionMonitor::new(config.timing.reconnect_interval, now),
            translator: Box::new(EnglishStrings),
            lang: "en".to_owned(),
            config,
            page,
            store,
            session,
            open,
            anchor_percent: None,
            panel_size,
            context_types,
            selected_context,
        }
    }

    /// Replace the built-in English strings with a host translator.
    #[must_use]
    pub fn with_translator(mut self, translator: Box<dyn Translator>, lang: impl Into<String>) -> Self {
        self.translator = translator;
        self.lang = lang.into();
        self
    }

    /// Effects that reproduce the persisted state on a fresh page: the
    /// restored transcript, the initial status surfaces, and the panel if it
    /// was left open.
    pub fn startup_effects(&self, view: &dyn ViewportProvider) -> Vec<Effect> {
        let mut effects = Vec::new();
        for message in self.session.messages() {
            let html = match message.role {
                Role::Assistant => floatchat_markdown::render(&message.content),
                Role::User => escape_html(&message.content),
            };
            let context_type = message
                .context_type
                .as_deref()
                .and_then(|id| find_context(&self.context_types, id));
            effects.push(Effect::AppendMessage {
                role: message.role,
                html,
                context_type,
                image: message.image_data.clone(),
            });
        }
        effects.push(Effect::SetConnectionStatus {
            connected: false,
            tooltip: self.tooltip(false),
        });
        effects.push(Effect::SetContextTag {
            tag: self.selected_context.clone(),
        });
        if self.open {
            effects.extend(self.open_effects(view));
        }
        effects
    }

    /// Advance the state machine by one event.
    pub fn handle_event(
        &mut self,
        event: WidgetEvent,
        now: Instant,
        view: &dyn ViewportProvider,
    ) -> Vec<Effect> {
        match event {
            WidgetEvent::PointerDown { target, position } => {
                self.drag
                    .on_pointer_down(target, position, view.anchor_rect().origin());
                Vec::new()
            }
            WidgetEvent::PointerMove { position } => self.on_pointer_move(position, view),
            WidgetEvent::PointerUp => self.on_pointer_up(now, view),
            WidgetEvent::ToggleClicked => {
                if self.drag.click_suppressed(now) {
                    return Vec::new();
                }
                self.set_open(!self.open, view)
            }
            WidgetEvent::CloseClicked => {
                if self.open {
                    self.set_open(false, view)
                } else {
                    Vec::new()
                }
            }
            WidgetEvent::ResizeHandleDown { corner, position } => {
                self.resize.begin(corner, position, view.panel_rect());
                Vec::new()
            }
            WidgetEvent::ViewportResized => {
                if self.coalescer.on_resize(now) {
                    self.rebase_effects(view)
                } else {
                    Vec::new()
                }
            }
            WidgetEvent::Tick => {
                let mut effects = Vec::new();
                if self.coalescer.poll(now) {
                    effects.extend(self.rebase_effects(view));
                }
                if self.monitor.due(now) {
                    effects.push(Effect::CheckHealth {
                        url: self.config.health_url(),
                    });
                }
                effects
            }
            WidgetEvent::MessageSubmitted { text, image } => self.on_submit(&text, image),
            WidgetEvent::SendCompleted { result } => self.on_send_completed(result),
            WidgetEvent::HealthChecked { connected } => {
                if self.monitor.record(connected, now) {
                    vec![Effect::SetConnectionStatus {
                        connected,
                        tooltip: self.tooltip(connected),
                    }]
                } else {
                    Vec::new()
                }
            }
            WidgetEvent::ContextTypeSelected { id } => {
                match find_context(&self.context_types, &id) {
                    Some(context) => {
                        self.selected_context = Some(context.clone());
                        vec![Effect::SetContextTag { tag: Some(context) }]
                    }
                    None => {
                        tracing::warn!(%id, "unknown context type selected");
                        Vec::new()
                    }
                }
            }
            WidgetEvent::ContextTagRemoved => {
                self.selected_context = None;
                vec![Effect::SetContextTag { tag: None }]
            }
            WidgetEvent::NewSessionRequested => self.on_new_session(),
            WidgetEvent::LanguageChanged { lang } => {
                self.lang = lang;
                let connected = self.monitor.is_connected();
                vec![
                    Effect::Retranslate,
                    Effect::SetConnectionStatus {
                        connected,
                        tooltip: self.tooltip(connected),
                    },
                ]
            }
        }
    }

    fn on_pointer_move(&mut self, position: Point, view: &dyn ViewportProvider) -> Vec<Effect> {
        if self.resize.is_resizing() {
            let limits = self.resize_limits();
            return match self.resize.on_pointer_move(position, view.viewport(), &limits) {
                Some(rect) => {
                    self.panel_size = rect.size();
                    vec![Effect::SetPanelRect { rect }]
                }
                None => Vec::new(),
            };
        }

        let ctx = DragContext {
            anchor_size: view.anchor_rect().size(),
            viewport: view.viewport(),
            margin: edge_margin(self.config.root_font_px),
        };
        match self.drag.on_pointer_move(position, &ctx) {
            Some(update) => {
                self.anchor_percent = Some(update.percent);
                let mut effects = vec![Effect::MoveAnchor {
                    position: update.position,
                }];
                if self.open {
                    let anchor = Rect::from_origin_size(update.position, ctx.anchor_size);
                    effects.extend(self.placement_effects(anchor, ctx.viewport));
                }
                effects
            }
            None => Vec::new(),
        }
    }

    fn on_pointer_up(&mut self, now: Instant, view: &dyn ViewportProvider) -> Vec<Effect> {
        if let Some(rect) = self.resize.finish() {
            self.panel_size = rect.size();
            store_json(&mut self.store, &self.config.keys.panel_size, &self.panel_size);
            return vec![Effect::SetActiveHandle {
                corner: active_resize_corner(view.anchor_rect(), rect),
            }];
        }
        self.drag.on_pointer_up(now);
        Vec::new()
    }

    fn set_open(&mut self, open: bool, view: &dyn ViewportProvider) -> Vec<Effect> {
        self.open = open;
        store_json(&mut self.store, &self.config.keys.open, &self.open);
        if self.open {
            self.open_effects(view)
        } else {
            vec![Effect::HidePanel]
        }
    }

    fn on_submit(&mut self, text: &str, image: Option<String>) -> Vec<Effect> {
        let text = text.trim();
        if (text.is_empty() && image.is_none()) || self.session.is_typing() {
            return Vec::new();
        }

        let context = self.selected_context.take();
        let mut message = StoredMessage::new(Role::User, text, now_ms());
        message.context_type = context.as_ref().map(|c| c.id.clone());
        message.image_data = image.clone();
        self.session.push_message(&mut self.store, message);
        self.session.set_typing(true);

        let request = ChatRequest {
            message: text.to_owned(),
            session_id: self.session.session_id().to_owned(),
            current_page: self.page.clone(),
            context: request_context(&self.config.profile, &now_iso()),
            context_type: context.as_ref().map(|c| c.id.clone()),
            paper_date: self.page.paper_date.clone(),
            image: image.clone(),
        };

        vec![
            Effect::AppendMessage {
                role: Role::User,
                html: escape_html(text),
                context_type: context,
                image,
            },
            Effect::SetContextTag { tag: None },
            Effect::SetTyping { active: true },
            Effect::SendRequest {
                url: self.config.server_url.0.clone(),
                request: Box::new(request),
            },
        ]
    }

    fn on_send_completed(&mut self, result: Result<ChatResponse, ChatError>) -> Vec<Effect> {
        self.session.set_typing(false);
        let mut effects = vec![Effect::SetTyping { active: false }];

        let text = match result {
            Ok(response) => {
                if let Some(id) = response.session_id.as_deref() {
                    self.session.adopt_session_id(&mut self.store, id);
                }
                if let Some(ids) = response.prediction_ids.clone().filter(|ids| !ids.is_empty()) {
                    effects.push(Effect::NotifyPredictions { ids });
                }
                response
                    .text()
                    .unwrap_or(self.config.messages.error_processing.as_str())
                    .to_owned()
            }
            Err(error) => {
                tracing::warn!(%error, "chat request failed");
                if error.is_connection() {
                    if self.monitor.set_connected(false) {
                        effects.push(Effect::SetConnectionStatus {
                            connected: false,
                            tooltip: self.tooltip(false),
                        });
                    }
                    self.config.messages.error_connection.clone()
                } else {
                    self.config.messages.error_generic.clone()
                }
            }
        };

        self.session
            .push_message(&mut self.store, StoredMessage::new(Role::Assistant, text.clone(), now_ms()));
        effects.push(Effect::AppendMessage {
            role: Role::Assistant,
            html: floatchat_markdown::render(&text),
            context_type: None,
            image: None,
        });

        let default = find_context(&self.context_types, "paper");
        self.selected_context = default.clone();
        effects.push(Effect::SetContextTag { tag: default });
        effects
    }

    fn on_new_session(&mut self) -> Vec<Effect> {
        self.session.reset(&mut self.store);
        let default = find_context(&self.context_types, "paper");
        self.selected_context = default.clone();
        let welcome = self
            .translator
            .translate(keys::WELCOME, &self.lang)
            .or_else(|| EnglishStrings.translate(keys::WELCOME, "en"))
            .unwrap_or_default();
        vec![
            Effect::ClearTranscript {
                welcome_html: floatchat_markdown::render(&welcome),
            },
            Effect::SetContextTag { tag: default },
            Effect::FocusInput,
        ]
    }

    /// Placement plus handle selection for the panel around `anchor`.
    fn placement_effects(&self, anchor: Rect, viewport: Size) -> Vec<Effect> {
        let placement =
            solve_panel_placement(anchor, self.panel_size, self.config.dimensions.gap, viewport);
        let rect = placement.resolve_rect(self.panel_size, viewport);
        let corner = active_resize_corner(anchor, rect);
        vec![
            Effect::PlacePanel { placement },
            Effect::SetActiveHandle { corner },
        ]
    }

    fn open_effects(&self, view: &dyn ViewportProvider) -> Vec<Effect> {
        let mut effects = vec![Effect::ShowPanel];
        effects.extend(self.placement_effects(view.anchor_rect(), view.viewport()));
        effects.push(Effect::FocusInput);
        effects
    }

    /// Reapply a dragged anchor position after the viewport changed: convert
    /// the stored percentage back to pixels and re-clamp. The percentage
    /// itself is left untouched so repeated resizes never drift.
    fn rebase_effects(&self, view: &dyn ViewportProvider) -> Vec<Effect> {
        let Some(percent) = self.anchor_percent else {
            return Vec::new();
        };
        let viewport = view.viewport();
        let anchor_size = view.anchor_rect().size();
        let margin = edge_margin(self.config.root_font_px);
        let desired = from_percent(percent, viewport);
        let position = Boundaries::for_anchor(anchor_size, viewport, margin).clamp(desired);

        let mut effects = vec![Effect::MoveAnchor { position }];
        if self.open {
            let anchor = Rect::from_origin_size(position, anchor_size);
            effects.extend(self.placement_effects(anchor, viewport));
        }
        effects
    }

    fn resize_limits(&self) -> ResizeLimits {
        ResizeLimits {
            min_width: self.config.dimensions.min_width,
            min_height: self.config.dimensions.min_height,
            max_width_fraction: self.config.dimensions.max_width_fraction,
            max_height_fraction: self.config.dimensions.max_height_fraction,
        }
    }

    fn tooltip(&self, connected: bool) -> String {
        let key = if connected {
            keys::TOOLTIP_CONNECTED
        } else {
            keys::TOOLTIP_OFFLINE
        };
        self.translator.translate(key, &self.lang).unwrap_or_else(|| {
            if connected {
                self.config.messages.tooltip_connected.clone()
            } else {
                self.config.messages.tooltip_offline.clone()
            }
        })
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.monitor.is_connected()
    }

    #[must_use]
    pub fn panel_size(&self) -> Size {
        self.panel_size
    }

    #[must_use]
    pub fn anchor_percent(&self) -> Option<PercentPoint> {
        self.anchor_percent
    }

    #[must_use]
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn find_context(types: &[ContextType], id: &str) -> Option<ContextType> {
    types.iter().find(|context| context.id == id).cloned()
}

impl<S: KeyValueStore> fmt::Debug for ChatWidget<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatWidget")
            .field("session_id", &self.session.session_id())
            .field("open", &self.open)
            .field("connected", &self.monitor.is_connected())
            .field("panel_size", &self.panel_size)
            .finish_non_exhaustive()
    }
}
