//! Modal screens: about, game over, credits. At most one is visible, it owns
//! the single clickable button region, and only the screen that raised
//! itself may clear itself again.

use bracket_geometry::prelude::{Point, Rect};
use bracket_terminal::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    About,
    GameOver,
    Credits,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    None,
    About,
    GameOver { reason: String, win: bool },
    Credits,
}

impl Overlay {
    pub fn kind(&self) -> Option<OverlayKind> {
        match self {
            Overlay::None => None,
            Overlay::About => Some(OverlayKind::About),
            Overlay::GameOver { .. } => Some(OverlayKind::GameOver),
            Overlay::Credits => Some(OverlayKind::Credits),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Overlay::None)
    }

    /// Raise a screen. Refused unless nothing is currently showing, which is
    /// what keeps two overlays from both reacting to the same click.
    pub fn open(&mut self, next: Overlay) -> bool {
        if self.is_none() && !next.is_none() {
            *self = next;
            true
        } else {
            false
        }
    }

    /// Clear the screen, but only for the caller that owns it.
    pub fn close(&mut self, kind: OverlayKind) -> bool {
        if self.kind() == Some(kind) {
            *self = Overlay::None;
            true
        } else {
            false
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Start,
    Restart,
    OpenRepo,
}

#[derive(Copy, Clone, Debug)]
pub struct ButtonRegion {
    pub rect: Rect,
    pub action: ButtonAction,
}

impl ButtonRegion {
    pub fn contains(&self, point: Point) -> bool {
        self.rect.point_in_rect(point)
    }
}

/// Draw the active overlay and hand back its button region, if any. The
/// shell stores the region and hit-tests clicks against it.
pub fn draw_overlay(ctx: &mut BTerm, overlay: &Overlay, width: i32, height: i32) -> Option<ButtonRegion> {
    match overlay {
        Overlay::None => None,
        Overlay::About => {
            let frame = modal_frame(ctx, width, height);
            print_centered_in(ctx, &frame, 2, RGB::named(WHITE), "Forest");
            print_centered_in(ctx, &frame, 4, RGB::named(WHITE), "Eliminate the orcs");
            print_centered_in(ctx, &frame, 5, RGB::named(WHITE), "by guiding them into trees.");
            Some(button(ctx, &frame, "Start Game", ButtonAction::Start))
        }
        Overlay::GameOver { reason, win } => {
            let frame = modal_frame(ctx, width, height);
            let title = if *win { "YOU WIN!" } else { "GAME OVER" };
            print_centered_in(ctx, &frame, 2, RGB::named(YELLOW), title);
            print_centered_in(ctx, &frame, 4, RGB::named(WHITE), reason);
            Some(button(ctx, &frame, "Play Again", ButtonAction::Restart))
        }
        Overlay::Credits => {
            let frame = modal_frame(ctx, width, height);
            print_centered_in(ctx, &frame, 1, RGB::named(GREEN), "FOREST");
            print_centered_in(ctx, &frame, 2, RGB::named(GREEN), "= Credits =");
            print_centered_in(ctx, &frame, 4, RGB::named(GREEN), "design and programming");
            print_centered_in(ctx, &frame, 5, RGB::named(GREEN), "Cooperative Game Cooperative");
            print_centered_in(ctx, &frame, 6, RGB::named(GREEN), "M. Cummings - R. Butz");
            print_centered_in(ctx, &frame, 8, RGB::named(GREEN), "Licensed under CC-BY 4.0 (c) 2024");
            Some(button(ctx, &frame, "Game code repo", ButtonAction::OpenRepo))
        }
    }
}

/// Centered modal at half the grid size: black fill, `*` border.
fn modal_frame(ctx: &mut BTerm, width: i32, height: i32) -> Rect {
    let box_w = width / 2;
    let box_h = height / 2;
    let x0 = (width - box_w) / 2;
    let y0 = (height - box_h) / 2;

    for y in y0..y0 + box_h {
        for x in x0..x0 + box_w {
            ctx.set(x, y, RGB::named(BLACK), RGB::named(BLACK), to_cp437(' '));
        }
    }
    for x in x0..x0 + box_w {
        ctx.set(x, y0, RGB::named(WHITE), RGB::named(BLACK), to_cp437('*'));
        ctx.set(x, y0 + box_h - 1, RGB::named(WHITE), RGB::named(BLACK), to_cp437('*'));
    }
    for y in y0..y0 + box_h {
        ctx.set(x0, y, RGB::named(WHITE), RGB::named(BLACK), to_cp437('*'));
        ctx.set(x0 + box_w - 1, y, RGB::named(WHITE), RGB::named(BLACK), to_cp437('*'));
    }

    Rect::with_size(x0, y0, box_w, box_h)
}

fn print_centered_in(ctx: &mut BTerm, frame: &Rect, row: i32, color: RGB, text: &str) {
    let x = frame.x1 + (frame.width() - text.len() as i32) / 2;
    ctx.print_color(x.max(frame.x1 + 1), frame.y1 + row, color, RGB::named(BLACK), text);
}

/// The single active button: a bracketed label near the bottom of the modal.
fn button(ctx: &mut BTerm, frame: &Rect, label: &str, action: ButtonAction) -> ButtonRegion {
    let text = format!("[ {label} ]");
    let width = text.len() as i32;
    let x = frame.x1 + (frame.width() - width) / 2;
    let y = frame.y1 + frame.height() - 3;
    ctx.print_color(x, y, RGB::named(BLACK), RGB::named(WHITE), &text);
    ButtonRegion {
        rect: Rect::with_size(x, y, width, 1),
        action,
    }
}
