use crate::domain::scene::Scene;
use crate::domain::state::{ConnectionStatus, Role};

// Port for the display surface: a canvas plus the role and status text fields.
pub trait View {
    fn show_role(&mut self, role: &Role);
    fn show_status(&mut self, status: &ConnectionStatus);
    fn draw(&mut self, scene: &Scene);
}
