#![forbid(unsafe_code)]

//! The host boundary: events in, effects out.
//!
//! The host forwards user input and completed IO as [`WidgetEvent`]s; the
//! widget answers with [`Effect`]s describing what to change. The widget
//! performs no IO itself; [`execute_io`] runs the two network effects on a
//! transport and hands the result back as the follow-up event.

use floatchat_geometry::{HandleCorner, PanelPlacement, Point, Rect};

use crate::config::ContextType;
use crate::drag::PressTarget;
use crate::error::ChatError;
use crate::session::Role;
use crate::transport::{ChatRequest, ChatResponse, ChatTransport};

/// Input to [`ChatWidget::handle_event`](crate::widget::ChatWidget::handle_event).
#[derive(Debug)]
pub enum WidgetEvent {
    /// Raw pointer press with the resolved target element.
    PointerDown { target: PressTarget, position: Point },
    PointerMove { position: Point },
    PointerUp,
    /// Click on the toggle (fires after pointer up; swallowed after drags).
    ToggleClicked,
    CloseClicked,
    /// Pointer press on a resize handle.
    ResizeHandleDown { corner: HandleCorner, position: Point },
    /// The viewport changed size or zoom.
    ViewportResized,
    /// Periodic tick driving the debounce and health-check schedules.
    Tick,
    /// The user submitted the input field.
    MessageSubmitted { text: String, image: Option<String> },
    ContextTypeSelected { id: String },
    ContextTagRemoved,
    /// A previously issued [`Effect::SendRequest`] finished.
    SendCompleted { result: Result<ChatResponse, ChatError> },
    /// A previously issued [`Effect::CheckHealth`] finished.
    HealthChecked { connected: bool },
    NewSessionRequested,
    LanguageChanged { lang: String },
}

/// Instructions for the host.
#[derive(Debug)]
pub enum Effect {
    /// Move the toggle anchor to a fixed pixel position.
    MoveAnchor { position: Point },
    /// Apply panel offsets (exactly one per axis is set).
    PlacePanel { placement: PanelPlacement },
    /// Apply an explicit panel rect (during resize gestures).
    SetPanelRect { rect: Rect },
    /// Show only this resize handle.
    SetActiveHandle { corner: HandleCorner },
    ShowPanel,
    HidePanel,
    FocusInput,
    /// Append a rendered message to the transcript.
    AppendMessage {
        role: Role,
        html: String,
        context_type: Option<ContextType>,
        image: Option<String>,
    },
    /// Replace the transcript with the welcome message.
    ClearTranscript { welcome_html: String },
    SetTyping { active: bool },
    SetConnectionStatus { connected: bool, tooltip: String },
    /// Show or clear the context tag on the input.
    SetContextTag { tag: Option<ContextType> },
    /// POST the request to the chat endpoint and feed the outcome back as
    /// [`WidgetEvent::SendCompleted`].
    SendRequest { url: String, request: Box<ChatRequest> },
    /// Probe the health endpoint and feed the outcome back as
    /// [`WidgetEvent::HealthChecked`].
    CheckHealth { url: String },
    /// Recognized item ids for the host's prediction hook.
    NotifyPredictions { ids: Vec<i64> },
    /// The language changed; re-resolve host-rendered strings.
    Retranslate,
}

/// Run an IO effect on `transport`, returning the follow-up event. Non-IO
/// effects return `None` and are the host's to apply.
pub fn execute_io(effect: &Effect, transport: &dyn ChatTransport) -> Option<WidgetEvent> {
    match effect {
        Effect::SendRequest { url, request } => Some(WidgetEvent::SendCompleted {
            result: transport.send_chat(url, request),
        }),
        Effect::CheckHealth { url } => Some(WidgetEvent::HealthChecked {
            connected: transport.check_health(url),
        }),
        _ => None,
    }
}
