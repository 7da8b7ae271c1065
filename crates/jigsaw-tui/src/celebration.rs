use crossterm::style::Color;
use rand::prelude::SliceRandom;
use rand::Rng;

/// A single confetti particle
#[derive(Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub char: char,
    pub color: Color,
    pub lifetime: f32,
}

impl Particle {
    pub fn is_visible(&self, width: u16, height: u16) -> bool {
        self.x >= 0.0
            && self.x < width as f32
            && self.y >= 0.0
            && self.y < height as f32
            && self.lifetime > 0.0
    }
}

/// Convert hue (0.0-1.0) to RGB color
pub fn hue_to_rgb(hue: f32) -> Color {
    let h = hue.rem_euclid(1.0) * 6.0;
    let x = (1.0 - (h % 2.0 - 1.0).abs()) * 255.0;

    let (r, g, b) = match h as i32 % 6 {
        0 => (255, x as u8, 0),
        1 => (x as u8, 255, 0),
        2 => (0, 255, x as u8),
        3 => (0, x as u8, 255),
        4 => (x as u8, 0, 255),
        _ => (255, 0, x as u8),
    };

    Color::Rgb { r, g, b }
}

const CONFETTI_CHARS: &[char] = &['*', '✦', '✧', '◆', '◇', '○', '●', '■', '□', '▲', '▽'];

const WIN_MESSAGES: [&str; 6] = [
    "PUZZLE COMPLETE!",
    "PICTURE PERFECT!",
    "EVERY PIECE IN PLACE!",
    "WELL DONE!",
    "BRILLIANT!",
    "ALL TOGETHER NOW!",
];

/// Confetti falling over the finished picture
pub struct WinScreen {
    particles: Vec<Particle>,
    frame_count: u32,
    rainbow_offset: f32,
    message_index: usize,
    pub width: u16,
    pub height: u16,
}

impl WinScreen {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            particles: Vec::new(),
            frame_count: 0,
            rainbow_offset: 0.0,
            message_index: rng.gen_range(0..WIN_MESSAGES.len()),
            width: 80,
            height: 24,
        }
    }

    pub fn reset(&mut self) {
        let mut rng = rand::thread_rng();
        self.particles.clear();
        self.frame_count = 0;
        self.rainbow_offset = 0.0;
        self.message_index = rng.gen_range(0..WIN_MESSAGES.len());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) {
        self.frame_count += 1;
        self.rainbow_offset += 0.05;

        let height = self.height as f32;
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.vy = (p.vy + 0.05).min(1.2);
            p.lifetime -= 0.016;
            p.lifetime > 0.0 && p.y < height + 2.0
        });

        self.spawn_confetti();
    }

    fn spawn_confetti(&mut self) {
        let mut rng = rand::thread_rng();
        let width = self.width.max(1) as f32;
        for _ in 0..3 {
            let hue = (self.rainbow_offset + rng.gen_range(0.0..1.0)) % 1.0;
            self.particles.push(Particle {
                x: rng.gen_range(0.0..width),
                y: -1.0,
                vx: rng.gen_range(-0.4..0.4),
                vy: rng.gen_range(0.3..0.9),
                char: CONFETTI_CHARS.choose(&mut rng).copied().unwrap_or('*'),
                color: hue_to_rgb(hue),
                lifetime: rng.gen_range(3.0..6.0),
            });
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn current_message(&self) -> &str {
        WIN_MESSAGES[self.message_index]
    }

    pub fn rainbow_offset(&self) -> f32 {
        self.rainbow_offset
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }
}

impl Default for WinScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_wraps() {
        assert_eq!(hue_to_rgb(0.0), Color::Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(hue_to_rgb(1.0), hue_to_rgb(0.0));
    }

    #[test]
    fn test_update_spawns_and_reset_clears() {
        let mut screen = WinScreen::new();
        screen.resize(40, 20);
        for _ in 0..10 {
            screen.update();
        }
        assert!(!screen.particles().is_empty());
        assert_eq!(screen.frame_count(), 10);

        screen.reset();
        assert!(screen.particles().is_empty());
        assert_eq!(screen.frame_count(), 0);
        assert!(!screen.current_message().is_empty());
    }
}
