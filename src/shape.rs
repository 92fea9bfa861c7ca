use rand::Rng;
use std::fmt;

/// A 4x4 occupancy matrix, indexed `[row][column]`; 1 is a filled cell.
pub type Matrix = [[u8; Shape::SIZE]; Shape::SIZE];

// Tetrominos in spawn orientation: I, O, T, L, J, S, Z.
static TEMPLATES: [Matrix; Shape::COUNT] = [
    [[1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 1], [0, 0, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 0, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 1], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
];

static NAMES: [char; Shape::COUNT] = ['I', 'O', 'T', 'L', 'J', 'S', 'Z'];

/// Number of shapes in the catalog.
pub const fn shape_count() -> usize {
    Shape::COUNT
}

/// Read-only template of shape `index`.
pub fn shape_template(index: usize) -> &'static Matrix {
    assert!(index < Shape::COUNT, "shape index {index} out of range");
    &TEMPLATES[index]
}

// quarter turn clockwise: the cell at (y, x) moves to (x, 3 - y)
pub(crate) const fn rotated(m: &Matrix) -> Matrix {
    let mut out = [[0; Shape::SIZE]; Shape::SIZE];
    let mut y = 0;
    while y < Shape::SIZE {
        let mut x = 0;
        while x < Shape::SIZE {
            out[x][Shape::SIZE - 1 - y] = m[y][x];
            x += 1;
        }
        y += 1;
    }
    out
}

// inverse of `rotated`
pub(crate) const fn rotated_back(m: &Matrix) -> Matrix {
    let mut out = [[0; Shape::SIZE]; Shape::SIZE];
    let mut y = 0;
    while y < Shape::SIZE {
        let mut x = 0;
        while x < Shape::SIZE {
            out[y][x] = m[x][Shape::SIZE - 1 - y];
            x += 1;
        }
        y += 1;
    }
    out
}

pub(crate) fn filled_count(m: &Matrix) -> usize {
    m.iter().flatten().filter(|&&c| c != 0).count()
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut m = *self.template();
        for r in 0..4 {
            writeln!(f, "Shape {} rotation {r}", self.name())?;
            for row in m {
                for c in row {
                    write!(f, "{}", if c != 0 { " X " } else { " . " })?
                }
                writeln!(f)?;
            }
            m = rotated(&m);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape(u8);

impl Shape {
    pub const COUNT: usize = 7;
    pub const SIZE: usize = 4;

    pub const fn new(kind: u8) -> Self {
        assert!((kind as usize) < Shape::COUNT, "shape kind out of range");
        Shape(kind)
    }

    /// Uniform pick from the catalog.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Shape(rng.random_range(0..Shape::COUNT as u8))
    }

    pub fn all() -> impl Iterator<Item = Shape> {
        (0..Shape::COUNT as u8).map(Shape)
    }

    pub const fn kind(&self) -> u8 {
        self.0
    }

    pub fn template(&self) -> &'static Matrix {
        &TEMPLATES[self.0 as usize]
    }

    pub fn name(&self) -> char {
        NAMES[self.0 as usize]
    }
}
