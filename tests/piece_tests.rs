//! Piece tests - construction and rotation

use wellblocks::{Piece, Shape};

#[test]
fn test_piece_copies_template() {
    let p = Piece::new(Shape::new(3), 0, 3, 0);
    assert_eq!(p.cells, *Shape::new(3).template());
    assert_eq!((p.x, p.y), (3, 0));
}

#[test]
fn test_rotate_does_not_touch_catalog() {
    let mut p = Piece::new(Shape::new(2), 0, 3, 0);
    p.rotate();
    assert_ne!(p.cells, *Shape::new(2).template());
    assert_eq!(Shape::new(2).template()[0], [0, 1, 1, 1]);
}

#[test]
fn test_four_rotations_are_identity() {
    for shape in Shape::all() {
        let mut p = Piece::new(shape, 0, 0, 0);
        for _ in 0..4 {
            p.rotate();
            assert_eq!(p.filled_count(), 4);
        }
        assert_eq!(p.cells, *shape.template(), "shape {}", shape.name());
    }
}

#[test]
fn test_rotate_back_reverts_rotate() {
    for shape in Shape::all() {
        let mut p = Piece::new(shape, 0, 0, 0);
        p.rotate();
        p.rotate_back();
        assert_eq!(p.cells, *shape.template());

        // three forward turns equal one turn back
        let mut q = Piece::new(shape, 0, 0, 0);
        q.rotate_back();
        p.rotate();
        p.rotate();
        p.rotate();
        assert_eq!(p.cells, q.cells);
    }
}

#[test]
fn test_rotate_maps_y_x_to_x_3_minus_y() {
    let mut p = Piece::new(Shape::new(6), 0, 0, 0); // Z
    let before = p.cells;
    p.rotate();
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(p.cells[x][3 - y], before[y][x]);
        }
    }
}

#[test]
fn test_footprint_is_offset_by_position() {
    let p = Piece::new(Shape::new(1), 0, 3, 5); // O
    let mut cells: Vec<_> = p.footprint().collect();
    cells.sort();
    assert_eq!(cells, vec![(4, 5), (4, 6), (5, 5), (5, 6)]);

    let mut below: Vec<_> = p.footprint_at(0, 1).collect();
    below.sort();
    assert_eq!(below, vec![(4, 6), (4, 7), (5, 6), (5, 7)]);
}

#[test]
#[should_panic]
fn test_color_out_of_range() {
    Piece::new(Shape::new(0), 7, 0, 0);
}
