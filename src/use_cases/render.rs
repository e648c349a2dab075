// Snapshot -> Scene. Pure; called once per state update.

use crate::domain::{Color, DrawCommand, Scene, Snapshot, TextAlign, TextSize};

// Horizontal gap between each paddle and its arena edge.
pub const PADDLE_MARGIN: f64 = 10.0;
pub const SCORE_TOP: f64 = 8.0;
pub const RESTART_PROMPT: &str = "Press SPACE to play again";

pub fn render(snapshot: &Snapshot) -> Scene {
    let mut commands = Vec::with_capacity(7);

    commands.push(fill(
        PADDLE_MARGIN,
        snapshot.left_y,
        snapshot.paddle_w,
        snapshot.paddle_h,
    ));
    commands.push(fill(
        snapshot.width - PADDLE_MARGIN - snapshot.paddle_w,
        snapshot.right_y,
        snapshot.paddle_w,
        snapshot.paddle_h,
    ));
    commands.push(fill(
        snapshot.ball_x,
        snapshot.ball_y,
        snapshot.ball_size,
        snapshot.ball_size,
    ));

    commands.push(text(
        snapshot.width / 4.0,
        SCORE_TOP,
        snapshot.score_left.to_string(),
        TextSize::Large,
        Color::WHITE,
    ));
    commands.push(text(
        3.0 * snapshot.width / 4.0,
        SCORE_TOP,
        snapshot.score_right.to_string(),
        TextSize::Large,
        Color::WHITE,
    ));

    if snapshot.game_over {
        let banner = if snapshot.left_won() {
            "LEFT WINS!"
        } else {
            "RIGHT WINS!"
        };
        commands.push(text(
            snapshot.width / 2.0,
            snapshot.height / 2.0 - 30.0,
            banner.to_string(),
            TextSize::Large,
            Color::GREEN,
        ));
        commands.push(text(
            snapshot.width / 2.0,
            snapshot.height / 2.0 + 20.0,
            RESTART_PROMPT.to_string(),
            TextSize::Small,
            Color::GREY,
        ));
    }

    Scene {
        width: snapshot.width,
        height: snapshot.height,
        background: Color::BLACK,
        commands,
    }
}

fn fill(x: f64, y: f64, w: f64, h: f64) -> DrawCommand {
    DrawCommand::FillRect {
        x,
        y,
        w,
        h,
        color: Color::WHITE,
    }
}

fn text(x: f64, y: f64, text: String, size: TextSize, color: Color) -> DrawCommand {
    DrawCommand::Text {
        x,
        y,
        text,
        size,
        align: TextAlign::Center,
        color,
    }
}
