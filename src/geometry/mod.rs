pub mod hit_testing;

pub use hit_testing::{
    bounds_of, catmull_rom, distance_to_closed_path, distance_to_line_segment, ellipse_contains,
    ellipse_outline, inside_canvas, rect_outline,
};
