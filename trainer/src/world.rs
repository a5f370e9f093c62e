//! A headless flappy-bird world: scrolling pipe pairs
//! and falling square bodies.
use crate::config::WorldConfig;

use flapevo::RandomSource;

/// Fastest downward velocity.
const MAX_FALL_SPEED: f64 = 5.0;
/// Fastest upward velocity, also used to
/// normalize the velocity sensor.
const MAX_RISE_SPEED: f64 = 12.5;

/// The action index that makes a bird jump. Any
/// other index lets it fall. Ties go to the higher
/// index, so a bird jumps only on a strictly
/// stronger jump output.
pub const JUMP: usize = 0;

/// A pair of pipes with an opening between them.
#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    x: f64,
    top: f64,
    bottom: f64,
}

impl Pipe {
    fn new<R>(x: f64, config: &WorldConfig, rng: &mut R) -> Pipe
    where
        R: RandomSource + ?Sized,
    {
        let gap = if config.gap_min == config.gap_max {
            config.gap_min
        } else {
            rng.gen_range(config.gap_min, config.gap_max)
        };
        let top = rng.gen_range(config.height * 0.1, config.height * 0.9 - gap);
        Pipe {
            x,
            top,
            bottom: top + gap,
        }
    }

    /// Left edge of the pair.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Upper edge of the opening.
    pub fn top(&self) -> f64 {
        self.top
    }

    /// Lower edge of the opening.
    pub fn bottom(&self) -> f64 {
        self.bottom
    }
}

/// The physical state of a bird. Horizontal
/// position is shared by every bird.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    y: f64,
    velocity: f64,
}

impl Body {
    /// A body at rest, halfway up the world.
    pub fn new(config: &WorldConfig) -> Body {
        Body {
            y: config.height / 2.0,
            velocity: 0.0,
        }
    }

    pub fn jump(&mut self, strength: f64) {
        self.velocity = -strength;
    }

    /// Applies one tick of gravity and moves the body.
    pub fn fall(&mut self, gravity: f64) {
        self.velocity = (self.velocity + gravity).clamp(-MAX_RISE_SPEED, MAX_FALL_SPEED);
        self.y += self.velocity;
    }

    /// Upper edge of the body.
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }
}

#[derive(Clone, Debug)]
pub struct World {
    config: WorldConfig,
    pipes: Vec<Pipe>,
    ticks: usize,
}

impl World {
    /// Creates a world with two pipe pairs, at half
    /// and three quarters of its width.
    pub fn new<R>(config: WorldConfig, rng: &mut R) -> World
    where
        R: RandomSource + ?Sized,
    {
        let pipes = vec![
            Pipe::new(config.width / 2.0, &config, rng),
            Pipe::new(config.width * 0.75, &config, rng),
        ];
        World {
            config,
            pipes,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    /// Ticks elapsed since the world was created.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Left edge of every bird.
    pub fn bird_x(&self) -> f64 {
        self.config.width * 0.05
    }

    /// Scrolls the world by one tick: a new pair enters
    /// from the right once the last one is a quarter width
    /// in, pairs that left the screen are dropped, and the
    /// rest move left.
    pub fn advance<R>(&mut self, rng: &mut R)
    where
        R: RandomSource + ?Sized,
    {
        let width = self.config.width;
        let last_x = self.pipes.last().map_or(f64::NEG_INFINITY, Pipe::x);
        if width - last_x > width / 4.0 {
            let pipe = Pipe::new(width, &self.config, rng);
            self.pipes.push(pipe);
        }
        let pipe_width = self.config.pipe_width;
        self.pipes.retain(|pipe| pipe.x + pipe_width >= 0.0);
        let speed = width * self.config.scroll_fraction;
        for pipe in &mut self.pipes {
            pipe.x -= speed;
        }
        self.ticks += 1;
    }

    /// Returns the nearest pair whose right edge is still
    /// ahead of the birds' left edge.
    pub fn closest_pipe(&self) -> Option<&Pipe> {
        let bird_x = self.bird_x();
        self.pipes
            .iter()
            .filter(|pipe| pipe.x + self.config.pipe_width > bird_x)
            .min_by(|a, b| a.x.total_cmp(&b.x))
    }

    /// Normalized sensor readings for a body: the closest
    /// opening's top and bottom, the body's center height
    /// and its velocity.
    pub fn sensors(&self, body: &Body) -> [f64; 4] {
        let height = self.config.height;
        let (top, bottom) = self
            .closest_pipe()
            .map_or((0.0, height), |pipe| (pipe.top, pipe.bottom));
        [
            top / height,
            bottom / height,
            (body.y + self.config.bird_size / 2.0) / height,
            body.velocity / MAX_RISE_SPEED,
        ]
    }

    /// Whether a body has left the world vertically or
    /// overlaps the closest pipe pair.
    pub fn collides(&self, body: &Body) -> bool {
        let size = self.config.bird_size;
        if body.y < 0.0 || body.y + size > self.config.height {
            return true;
        }
        let bird_x = self.bird_x();
        match self.closest_pipe() {
            Some(pipe) => {
                let overlaps_x = bird_x < pipe.x + self.config.pipe_width && bird_x + size > pipe.x;
                overlaps_x && (body.y < pipe.top || body.y + size > pipe.bottom)
            }
            None => false,
        }
    }
}
