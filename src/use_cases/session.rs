// The single owner of client state: role, connection status, last snapshot
// and input. Every event callback of the loop lands here.

use super::input::InputHandler;
use super::render::render;
use super::types::{ClientEvent, Outbound};
use crate::domain::{ConnectionStatus, KeyTransition, Role, Snapshot, View};
use tracing::{debug, info};

pub struct Session<V: View> {
    view: V,
    role: Option<Role>,
    status: ConnectionStatus,
    snapshot: Option<Snapshot>,
    input: InputHandler,
}

impl<V: View> Session<V> {
    pub fn new(mut view: V) -> Self {
        let status = ConnectionStatus::Connecting;
        view.show_status(&status);
        Self {
            view,
            role: None,
            status,
            snapshot: None,
            input: InputHandler::new(),
        }
    }

    pub fn handle_event(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Connected => self.set_status(ConnectionStatus::Connected),
            ClientEvent::Disconnected { retry_in } => {
                self.set_status(ConnectionStatus::Disconnected { retry_in })
            }
            ClientEvent::Role(role) => {
                info!(role = %role, "role assigned");
                self.view.show_role(&role);
                self.role = Some(role);
            }
            ClientEvent::State(snapshot) => {
                let scene = render(&snapshot);
                self.view.draw(&scene);
                self.snapshot = Some(snapshot);
            }
        }
    }

    pub fn handle_key(&mut self, transition: KeyTransition) -> Option<Outbound> {
        let outbound = self.input.on_key(transition);
        if let Some(message) = &outbound {
            debug!(?transition, ?message, "key produced outbound message");
        }
        outbound
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        if status != self.status {
            info!(status = %status, "connection status changed");
        }
        self.status = status;
        self.view.show_status(&status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DrawCommand, InputState, Key, Scene};
    use crate::use_cases::render::tests::sample_snapshot;
    use std::time::Duration;

    // Records everything the session pushes to the display surface.
    #[derive(Default)]
    struct RecordingView {
        role: Option<String>,
        statuses: Vec<String>,
        scenes: Vec<Scene>,
    }

    impl View for RecordingView {
        fn show_role(&mut self, role: &Role) {
            self.role = Some(role.to_string());
        }

        fn show_status(&mut self, status: &ConnectionStatus) {
            self.statuses.push(status.to_string());
        }

        fn draw(&mut self, scene: &Scene) {
            self.scenes.push(scene.clone());
        }
    }

    #[test]
    fn new_session_shows_connecting() {
        let mut session = Session::new(RecordingView::default());
        assert_eq!(session.status(), ConnectionStatus::Connecting);
        assert_eq!(session.view_mut().statuses, vec!["Connecting..."]);
    }

    #[test]
    fn role_message_sets_displayed_role_text() {
        let mut session = Session::new(RecordingView::default());
        session.handle_event(ClientEvent::Role(Role::new("right")));
        assert_eq!(session.view_mut().role.as_deref(), Some("right"));

        // A later role replaces the previous one.
        session.handle_event(ClientEvent::Role(Role::new("spectator")));
        assert_eq!(session.view_mut().role.as_deref(), Some("spectator"));
        assert_eq!(session.role().map(Role::as_str), Some("spectator"));
    }

    #[test]
    fn each_state_message_redraws_exactly_once() {
        let mut session = Session::new(RecordingView::default());
        let first = sample_snapshot();
        let second = Snapshot {
            ball_x: 40.0,
            ..sample_snapshot()
        };

        session.handle_event(ClientEvent::State(first));
        session.handle_event(ClientEvent::State(second.clone()));

        let scenes = &session.view_mut().scenes;
        assert_eq!(scenes.len(), 2);
        assert!(matches!(
            scenes[1].commands[2],
            DrawCommand::FillRect { x, .. } if x == 40.0
        ));
        assert_eq!(session.snapshot(), Some(&second));
    }

    #[test]
    fn role_and_status_updates_do_not_draw() {
        let mut session = Session::new(RecordingView::default());
        session.handle_event(ClientEvent::Connected);
        session.handle_event(ClientEvent::Role(Role::new("left")));
        assert!(session.view_mut().scenes.is_empty());
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn connection_events_update_status_text() {
        let mut session = Session::new(RecordingView::default());
        session.handle_event(ClientEvent::Connected);
        session.handle_event(ClientEvent::Disconnected {
            retry_in: Duration::from_millis(250),
        });
        assert_eq!(
            session.view_mut().statuses,
            vec![
                "Connecting...",
                "Connected",
                "Disconnected - reconnecting in 250 ms"
            ]
        );
    }

    #[test]
    fn keys_are_relayed_as_outbound_messages() {
        let mut session = Session::new(RecordingView::default());
        assert_eq!(
            session.handle_key(KeyTransition::Pressed(Key::Char('s'))),
            Some(Outbound::Input(InputState {
                up: false,
                down: true
            }))
        );
        assert_eq!(
            session.handle_key(KeyTransition::Pressed(Key::Space)),
            Some(Outbound::Reset)
        );
    }
}
