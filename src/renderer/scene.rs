//! Draw a simulation snapshot into a pixel buffer
//!
//! World units are scaled uniformly to fit the buffer and centred. All styling
//! lives here; the snapshot only carries positions and numbers.

use super::pixels::{PixelBuf, Rgb};
use crate::config::WorldConfig;
use crate::consts::{GROUND_TILE_PERIOD, MILESTONE_TEXT_LIFE};
use crate::sim::{GamePhase, Medal, Snapshot, TextKind};

const SKY_TOP: Rgb = Rgb(112, 197, 206);
const SKY_BOT: Rgb = Rgb(180, 220, 180);
const GRASS: Rgb = Rgb(106, 176, 76);
const GRASS_DARK: Rgb = Rgb(74, 144, 48);
const DIRT: Rgb = Rgb(222, 216, 149);
const DIRT_DARK: Rgb = Rgb(200, 190, 120);
const PIPE: Rgb = Rgb(62, 168, 50);
const PIPE_HI: Rgb = Rgb(85, 204, 68);
const PIPE_EDGE: Rgb = Rgb(45, 122, 36);
const BODY: Rgb = Rgb(255, 221, 0);
const BODY_HI: Rgb = Rgb(255, 255, 136);
const WING: Rgb = Rgb(232, 160, 32);
const EYE: Rgb = Rgb(255, 255, 255);
const PUPIL: Rgb = Rgb(34, 34, 34);
const BEAK: Rgb = Rgb(255, 140, 0);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(85, 85, 85);
const PANEL: Rgb = Rgb(26, 26, 46);
const PANEL_EDGE: Rgb = Rgb(255, 221, 0);
const GAME_OVER: Rgb = Rgb(255, 68, 68);

// ── 3x5 bitmap glyphs ──────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
const PLUS: [u8; 15] = [0,0,0, 0,1,0, 1,1,1, 0,1,0, 0,0,0];
#[rustfmt::skip]
const BANG: [u8; 15] = [0,1,0, 0,1,0, 0,1,0, 0,0,0, 0,1,0];

fn glyph(ch: char) -> Option<&'static [u8; 15]> {
    match ch {
        '0'..='9' => Some(&DIGITS[ch as usize - '0' as usize]),
        '+' => Some(&PLUS),
        '!' => Some(&BANG),
        _ => None,
    }
}

/// Text width in pixels at a given glyph scale
fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().filter(|&c| glyph(c).is_some()).count() as i32;
    (n * 4 - 1).max(0) * scale
}

/// Draw supported glyphs centred on `cx`; other characters are skipped
fn draw_text(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, scale: i32, fg: Rgb) {
    let mut x = cx - text_width(text, scale) / 2;
    for g in text.chars().filter_map(glyph) {
        for row in 0..5 {
            for col in 0..3 {
                if g[row * 3 + col] == 1 {
                    let px = x + col as i32 * scale;
                    let py = y + row as i32 * scale;
                    buf.fill_rect(px + 1, py + 1, scale, scale, SHADOW);
                    buf.fill_rect(px, py, scale, scale, fg);
                }
            }
        }
        x += 4 * scale;
    }
}

/// World-to-pixel mapping
#[derive(Debug, Clone, Copy)]
pub struct View {
    scale: f32,
    ox: f32,
    oy: f32,
}

impl View {
    /// Largest uniform scale that fits the world into the buffer
    pub fn fit(config: &WorldConfig, buf: &PixelBuf) -> Self {
        let sx = buf.width() as f32 / config.width;
        let sy = buf.height() as f32 / config.height;
        let scale = sx.min(sy);
        Self {
            scale,
            ox: (buf.width() as f32 - config.width * scale) / 2.0,
            oy: (buf.height() as f32 - config.height * scale) / 2.0,
        }
    }

    pub fn x(&self, wx: f32) -> i32 {
        (self.ox + wx * self.scale).floor() as i32
    }

    pub fn y(&self, wy: f32) -> i32 {
        (self.oy + wy * self.scale).floor() as i32
    }

    pub fn len(&self, w: f32) -> i32 {
        ((w * self.scale).round() as i32).max(1)
    }
}

/// Draw one full frame
pub fn draw(buf: &mut PixelBuf, snap: &Snapshot, config: &WorldConfig) {
    buf.fill(Rgb(0, 0, 0));
    let view = View::fit(config, buf);

    draw_sky(buf, &view, config);
    draw_obstacles(buf, &view, snap, config);
    draw_ground(buf, &view, snap, config);
    draw_particles(buf, &view, snap);
    draw_actor(buf, &view, snap);
    draw_texts(buf, &view, snap);
    draw_hud(buf, &view, snap, config);

    match snap.phase {
        GamePhase::Waiting => draw_title(buf, &view, config),
        GamePhase::Dead => draw_game_over(buf, &view, snap, config),
        GamePhase::Playing => {}
    }
}

fn draw_sky(buf: &mut PixelBuf, view: &View, config: &WorldConfig) {
    let top = view.y(0.0);
    let bottom = view.y(config.ground_y());
    let (left, right) = (view.x(0.0), view.x(config.width));
    for y in top..bottom {
        let t = (y - top) as f32 / (bottom - top).max(1) as f32;
        let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
        for x in left..right {
            buf.set(x, y, c);
        }
    }
}

fn draw_obstacles(buf: &mut PixelBuf, view: &View, snap: &Snapshot, config: &WorldConfig) {
    let w = view.len(config.obstacle_width);
    let cap_h = view.len(18.0);
    let cap_ext = view.len(6.0);
    let top = view.y(0.0);
    let ground = view.y(config.ground_y());

    for obstacle in &snap.obstacles {
        let x = view.x(obstacle.x);
        let gap_top = view.y(obstacle.gap_top as f32);
        let gap_bot = view.y(obstacle.gap_bottom(config.gap_height));

        // Upper body and cap
        buf.fill_rect(x, top, w, gap_top - top, PIPE);
        buf.fill_rect(x + w / 6, top, (w / 8).max(1), gap_top - top, PIPE_HI);
        buf.fill_rect(x - cap_ext, gap_top - cap_h, w + cap_ext * 2, cap_h, PIPE);
        buf.fill_rect(x - cap_ext, gap_top - 1, w + cap_ext * 2, 1, PIPE_EDGE);

        // Lower body and cap
        buf.fill_rect(x, gap_bot, w, ground - gap_bot, PIPE);
        buf.fill_rect(x + w / 6, gap_bot, (w / 8).max(1), ground - gap_bot, PIPE_HI);
        buf.fill_rect(x - cap_ext, gap_bot, w + cap_ext * 2, cap_h, PIPE);
        buf.fill_rect(x - cap_ext, gap_bot, w + cap_ext * 2, 1, PIPE_EDGE);
    }
}

fn draw_ground(buf: &mut PixelBuf, view: &View, snap: &Snapshot, config: &WorldConfig) {
    let gy = view.y(config.ground_y());
    let bottom = view.y(config.height);
    let grass_h = view.len(12.0);
    let (left, right) = (view.x(0.0), view.x(config.width));
    let tile = view.len(GROUND_TILE_PERIOD);
    let offset = view.len(snap.ground_offset.max(0.0)) % tile;

    for x in left..right {
        let stripe = (x - left + offset).rem_euclid(tile) < tile / 2;
        for y in gy..gy + grass_h {
            buf.set(x, y, if stripe { GRASS } else { GRASS_DARK });
        }
        for y in gy + grass_h..bottom {
            buf.set(x, y, if stripe { DIRT } else { DIRT_DARK });
        }
    }
}

fn draw_particles(buf: &mut PixelBuf, view: &View, snap: &Snapshot) {
    for p in &snap.particles {
        let life = p.life.clamp(0.0, 1.0);
        let c = Rgb::lerp(SKY_TOP, Rgb::from_packed(p.color), life);
        let r = ((p.size * life * view.scale) as i32).max(0);
        buf.fill_circle(view.x(p.pos.x), view.y(p.pos.y), r, c);
    }
}

fn draw_actor(buf: &mut PixelBuf, view: &View, snap: &Snapshot) {
    let a = &snap.actor;
    let cx = view.x(a.x);
    let cy = view.y(a.y);
    let r = view.len(a.radius);
    // Nose dips as rotation goes positive
    let tilt = (a.rotation / 30.0).round() as i32;

    buf.fill_circle(cx, cy, r, BODY);
    buf.fill_circle(cx - r / 3, cy - r / 3, (r / 3).max(1), BODY_HI);

    let wing_dy = (a.wing_angle.to_radians().sin() * r as f32 * 0.5).round() as i32;
    buf.fill_rect(cx - r, cy + wing_dy, r, (r / 2).max(1), WING);

    let ex = cx + r / 3;
    let ey = cy - r / 3;
    buf.fill_circle(ex, ey, (r / 3).max(1), EYE);
    buf.set(ex + 1, ey + (a.vel * 0.1).clamp(-1.0, 1.0) as i32, PUPIL);

    buf.fill_rect(cx + r, cy - 1 + tilt, (r / 2).max(1), (r / 3).max(1), BEAK);
}

fn draw_texts(buf: &mut PixelBuf, view: &View, snap: &Snapshot) {
    for text in &snap.texts {
        let (fade, scale) = match text.kind {
            TextKind::Point => (text.life, 1),
            TextKind::Milestone => (text.life / MILESTONE_TEXT_LIFE, 2),
        };
        let v = (255.0 * fade.clamp(0.0, 1.0)) as u8;
        draw_text(
            buf,
            view.x(text.pos.x),
            view.y(text.pos.y),
            &text.text,
            scale,
            Rgb(v, v, 0),
        );
    }
}

fn draw_hud(buf: &mut PixelBuf, view: &View, snap: &Snapshot, config: &WorldConfig) {
    let cx = view.x(config.width / 2.0);
    draw_text(buf, cx, view.y(30.0), &snap.score.to_string(), 2, WHITE);

    let best = snap.best.to_string();
    let right = view.x(config.width) - 2;
    draw_text(buf, right - text_width(&best, 1) / 2, view.y(0.0) + 1, &best, 1, PANEL_EDGE);
}

fn draw_title(buf: &mut PixelBuf, view: &View, config: &WorldConfig) {
    let cx = view.x(config.width / 2.0);
    let cy = view.y(config.height / 2.0);
    let w = view.len(280.0);
    let h = view.len(60.0);
    let top = cy - view.len(140.0);
    buf.fill_rect(cx - w / 2, top, w, h, PANEL);
    // Actor icon on the card
    buf.fill_circle(cx, top + h / 2, (h / 4).max(1), BODY);
    buf.fill_rect(cx + h / 4, top + h / 2 - 1, (h / 6).max(1), (h / 8).max(1), BEAK);
}

fn draw_game_over(buf: &mut PixelBuf, view: &View, snap: &Snapshot, config: &WorldConfig) {
    buf.darken();

    let cx = view.x(config.width / 2.0);
    let cy = view.y(config.height / 2.0);
    let w = view.len(300.0);
    let h = view.len(220.0);
    let (x0, y0) = (cx - w / 2, cy - view.len(100.0));
    buf.fill_rect(x0 - 1, y0 - 1, w + 2, h + 2, PANEL_EDGE);
    buf.fill_rect(x0, y0, w, h, PANEL);
    buf.fill_rect(x0 + 2, y0 + 2, w - 4, view.len(8.0), GAME_OVER);

    draw_text(buf, cx, y0 + h / 4, &snap.score.to_string(), 2, WHITE);

    let medal = match snap.medal {
        Medal::Gold => Some(Rgb(255, 215, 0)),
        Medal::Silver => Some(Rgb(192, 192, 192)),
        Medal::Bronze => Some(Rgb(205, 127, 50)),
        Medal::None => None,
    };
    if let Some(c) = medal {
        buf.fill_circle(cx, y0 + h / 2 + 2, view.len(18.0), c);
    }

    draw_text(buf, cx, y0 + h * 3 / 4, &snap.best.to_string(), 1, PANEL_EDGE);
}
