use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use bracket_terminal::prelude::{BLUE, GRAY, GREEN, RED, RGB};

use crate::config::GameSettings;

/// Row 0 never holds terrain; the renderer uses it for live counters.
pub const HEADER_ROW: i32 = 0;

// A walled-in blob stops growing instead of spinning forever.
const BLOB_GROWTH_ATTEMPTS: u32 = 400;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileKind {
    Grass,
    Border,
    Mountain,
    Tree,
    River,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileInfo {
    pub glyph: char,
    pub color: RGB,
    pub passable: bool,
    pub kills: bool,
}

impl TileKind {
    pub fn info(self) -> TileInfo {
        match self {
            TileKind::Grass => TileInfo {
                glyph: '~',
                color: RGB::from_u8(0, 51, 0),
                passable: true,
                kills: false,
            },
            TileKind::Border => TileInfo {
                glyph: 'X',
                color: RGB::named(RED),
                passable: false,
                kills: true,
            },
            TileKind::Mountain => TileInfo {
                glyph: 'M',
                color: RGB::named(GRAY),
                passable: false,
                kills: true,
            },
            TileKind::Tree => TileInfo {
                glyph: 'T',
                color: RGB::named(GREEN),
                passable: false,
                kills: true,
            },
            TileKind::River => TileInfo {
                glyph: 'r',
                color: RGB::named(BLUE),
                passable: false,
                kills: true,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TileKind::Grass => "grass",
            TileKind::Border => "border",
            TileKind::Mountain => "mountain",
            TileKind::Tree => "tree",
            TileKind::River => "river",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameMap {
    pub width: i32,
    pub height: i32,
    tiles: Vec<TileKind>,
}

impl GameMap {
    pub fn filled(width: i32, height: i32, kind: TileKind) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![kind; size],
        }
    }

    /// Full generation pass: border ring, mountain blobs, river, trees.
    /// Later features only ever stamp cells that are still grass, so the
    /// order decides which feature wins a contested cell.
    pub fn generate(settings: &GameSettings, rng: &mut RandomNumberGenerator) -> Self {
        let mut map = Self::filled(settings.grid_width, settings.grid_height, TileKind::Grass);

        for x in 0..map.width {
            map.set_tile(Point::new(x, HEADER_ROW), TileKind::Border);
        }
        for y in 1..map.height {
            for x in 0..map.width {
                if x == 0 || x == map.width - 1 || y == 1 || y == map.height - 1 {
                    map.set_tile(Point::new(x, y), TileKind::Border);
                }
            }
        }

        map.raise_mountains(settings.mountain_blobs, settings.mountain_max_size, rng);
        map.carve_river(settings.river_width, rng);
        map.scatter_trees(settings.number_of_trees, rng);
        map
    }

    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(Point::new(x, y)) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    /// Strictly inside the outer ring. Row 1 is border and fails the grass
    /// checks on its own, so interior callers need not special-case it.
    pub fn interior(&self, point: Point) -> bool {
        point.x > 0 && point.x < self.width - 1 && point.y > 0 && point.y < self.height - 1
    }

    pub fn tile_at(&self, point: Point) -> Option<TileKind> {
        self.idx(point.x, point.y).map(|idx| self.tiles[idx])
    }

    pub fn set_tile(&mut self, point: Point, kind: TileKind) {
        if let Some(idx) = self.idx(point.x, point.y) {
            self.tiles[idx] = kind;
        }
    }

    /// Stamp a cell only if it is still grass; everything the generators
    /// lay down after the border goes through here.
    fn stamp_grass(&mut self, point: Point, kind: TileKind) {
        if let Some(idx) = self.idx(point.x, point.y) {
            if self.tiles[idx] == TileKind::Grass {
                self.tiles[idx] = kind;
            }
        }
    }

    pub fn is_grass(&self, point: Point) -> bool {
        self.tile_at(point) == Some(TileKind::Grass)
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| **tile == kind).count()
    }

    /// First grass cell in scan order, used as the fallback when rejection
    /// sampling runs out of attempts on a crowded map.
    pub fn first_grass(&self) -> Option<Point> {
        for y in 0..self.height {
            for x in 0..self.width {
                let point = Point::new(x, y);
                if self.is_grass(point) {
                    return Some(point);
                }
            }
        }
        None
    }

    /// Rejection-sample a random interior grass cell. `None` means the map
    /// has no grass left at all.
    pub fn random_grass_cell(&self, rng: &mut RandomNumberGenerator) -> Option<Point> {
        let attempts = (self.width * self.height * 10).max(1);
        for _ in 0..attempts {
            let x = rng.range(1, self.width - 1);
            let y = rng.range(2, self.height - 1);
            let point = Point::new(x, y);
            if self.is_grass(point) {
                return Some(point);
            }
        }
        self.first_grass()
    }

    /// Biased random walk from a random edge toward the opposite one,
    /// stamping a perpendicular strip of `river_width` each step: 40% meander
    /// one way, 40% the other, 20% advance. The walk ends when it leaves the
    /// grid, which the advance branch eventually forces.
    fn carve_river(&mut self, river_width: i32, rng: &mut RandomNumberGenerator) {
        let edge = rng.range(0, 4);
        let (mut cursor, advance) = match edge {
            0 => (Point::new(rng.range(0, self.width), 0), Point::new(0, 1)),
            1 => (
                Point::new(rng.range(0, self.width), self.height - 1),
                Point::new(0, -1),
            ),
            2 => (Point::new(0, rng.range(0, self.height)), Point::new(1, 0)),
            _ => (
                Point::new(self.width - 1, rng.range(0, self.height)),
                Point::new(-1, 0),
            ),
        };

        let half = river_width / 2;
        while self.in_bounds(cursor) {
            for offset in -half..=half {
                let strip = if advance.y != 0 {
                    Point::new(cursor.x + offset, cursor.y)
                } else {
                    Point::new(cursor.x, cursor.y + offset)
                };
                self.stamp_grass(strip, TileKind::River);
            }

            let roll = rng.range(0, 100);
            if advance.y != 0 {
                if roll < 40 && cursor.x > 0 {
                    cursor.x -= 1;
                } else if roll < 80 && cursor.x < self.width - 1 {
                    cursor.x += 1;
                } else {
                    cursor.y += advance.y;
                }
            } else if roll < 40 && cursor.y > 0 {
                cursor.y -= 1;
            } else if roll < 80 && cursor.y < self.height - 1 {
                cursor.y += 1;
            } else {
                cursor.x += advance.x;
            }
        }
    }

    /// Grow each blob by repeated random-neighbour expansion from a grass
    /// seed. Growth only accepts interior grass cells not already in the
    /// blob, so mountains never cut through the river or the border.
    fn raise_mountains(&mut self, blobs: u32, max_size: u32, rng: &mut RandomNumberGenerator) {
        for _ in 0..blobs {
            let Some(seed) = self.random_grass_cell(rng) else {
                break;
            };

            if max_size <= 1 {
                self.set_tile(seed, TileKind::Mountain);
                continue;
            }

            let mut blob = vec![seed];
            let mut accepted = 0;
            let mut attempts = 0;
            while accepted < max_size && attempts < BLOB_GROWTH_ATTEMPTS {
                attempts += 1;
                let anchor = blob[rng.range(0, blob.len() as i32) as usize];
                let dirs = [
                    Point::new(1, 0),
                    Point::new(-1, 0),
                    Point::new(0, 1),
                    Point::new(0, -1),
                ];
                let dir = dirs[rng.range(0, 4) as usize];
                let candidate = Point::new(anchor.x + dir.x, anchor.y + dir.y);
                if !self.interior(candidate)
                    || !self.is_grass(candidate)
                    || blob.contains(&candidate)
                {
                    continue;
                }
                blob.push(candidate);
                accepted += 1;
            }

            for point in blob {
                self.set_tile(point, TileKind::Mountain);
            }
        }
    }

    fn scatter_trees(&mut self, count: u32, rng: &mut RandomNumberGenerator) {
        for _ in 0..count {
            match self.random_grass_cell(rng) {
                Some(point) => self.set_tile(point, TileKind::Tree),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GameSettings {
        GameSettings::default()
    }

    #[test]
    fn border_ring_and_header_row() {
        let mut rng = RandomNumberGenerator::seeded(7);
        let map = GameMap::generate(&settings(), &mut rng);
        for x in 0..map.width {
            assert_eq!(map.tile_at(Point::new(x, 0)), Some(TileKind::Border));
            assert_eq!(map.tile_at(Point::new(x, 1)), Some(TileKind::Border));
            assert_eq!(
                map.tile_at(Point::new(x, map.height - 1)),
                Some(TileKind::Border)
            );
        }
        for y in 1..map.height {
            assert_eq!(map.tile_at(Point::new(0, y)), Some(TileKind::Border));
            assert_eq!(
                map.tile_at(Point::new(map.width - 1, y)),
                Some(TileKind::Border)
            );
        }
    }

    #[test]
    fn tree_count_is_exact_on_default_grid() {
        let mut rng = RandomNumberGenerator::seeded(7);
        let map = GameMap::generate(&settings(), &mut rng);
        assert_eq!(
            map.count(TileKind::Tree),
            settings().number_of_trees as usize
        );
    }

    #[test]
    fn mountain_tiles_bounded_by_blob_budget() {
        let cfg = settings();
        let mut rng = RandomNumberGenerator::seeded(99);
        let map = GameMap::generate(&cfg, &mut rng);
        let ceiling = (cfg.mountain_blobs * (cfg.mountain_max_size + 1)) as usize;
        assert!(map.count(TileKind::Mountain) <= ceiling);
    }

    #[test]
    fn stamp_never_overwrites_earlier_features() {
        let mut map = GameMap::filled(10, 10, TileKind::Grass);
        let cell = Point::new(4, 4);
        map.set_tile(cell, TileKind::Tree);
        map.stamp_grass(cell, TileKind::River);
        assert_eq!(map.tile_at(cell), Some(TileKind::Tree));
    }

    #[test]
    fn river_runs_on_an_open_field() {
        // No border here, so the very first strip lands on grass.
        let mut map = GameMap::filled(20, 20, TileKind::Grass);
        let mut rng = RandomNumberGenerator::seeded(3);
        map.carve_river(3, &mut rng);
        assert!(map.count(TileKind::River) > 0);
    }

    #[test]
    fn single_tile_blobs() {
        let mut map = GameMap::filled(16, 16, TileKind::Grass);
        let mut rng = RandomNumberGenerator::seeded(11);
        map.raise_mountains(4, 1, &mut rng);
        assert_eq!(map.count(TileKind::Mountain), 4);
    }

    #[test]
    fn random_grass_cell_falls_back_to_scan() {
        let mut map = GameMap::filled(10, 10, TileKind::Mountain);
        let only = Point::new(3, 7);
        map.set_tile(only, TileKind::Grass);
        let mut rng = RandomNumberGenerator::seeded(1);
        assert_eq!(map.random_grass_cell(&mut rng), Some(only));
    }

    #[test]
    fn no_grass_means_no_placement() {
        let map = GameMap::filled(10, 10, TileKind::Mountain);
        let mut rng = RandomNumberGenerator::seeded(1);
        assert_eq!(map.random_grass_cell(&mut rng), None);
    }
}
