use crate::error::{OperationError, Result};

/// Parameters shared by every plan operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanConfig {
    /// Width of the outline stroke drawn around walls.
    pub stroke_width: f64,
    /// Radius searched around a wall part when looking for a new wall.
    pub part_search_radius: f64,
    /// Squared distance beyond which a wall part cannot attach to a wall.
    pub part_max_distance_sq: f64,
    /// Shortest length a wall part may be shrunk to.
    pub min_part_length: f64,
    /// Length given to newly attached wall parts.
    pub default_part_length: f64,
    /// Smallest junction thickness of a point with walls attached.
    pub min_point_size: f64,
    /// Junction thickness of a point with no walls attached.
    pub default_point_size: f64,
    /// Thinnest allowed wall.
    pub min_wall_width: f64,
    /// Thickest allowed wall.
    pub max_wall_width: f64,
    /// Angular slack (radians) for collinear and opposite wall detection.
    pub angle_tolerance: f64,
    /// Longest wall stub drawn by a junction cap.
    pub max_stub_length: f64,
    /// Snap step for sliding a wall part along its wall.
    pub grid_size: f64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            stroke_width: 1.0,
            part_search_radius: 50.0,
            part_max_distance_sq: 5000.0,
            min_part_length: 15.0,
            default_part_length: 60.0,
            min_point_size: 6.0,
            default_point_size: 10.0,
            min_wall_width: 2.0,
            max_wall_width: 42.0,
            angle_tolerance: 0.05,
            max_stub_length: 50.0,
            grid_size: 10.0,
        }
    }
}

impl PlanConfig {
    /// Sets the outline stroke width.
    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Sets the wall part search radius and squared cutoff distance.
    #[must_use]
    pub fn with_part_search(mut self, radius: f64, max_distance_sq: f64) -> Self {
        self.part_search_radius = radius;
        self.part_max_distance_sq = max_distance_sq;
        self
    }

    /// Sets the minimum and default wall part lengths.
    #[must_use]
    pub fn with_part_lengths(mut self, min: f64, default: f64) -> Self {
        self.min_part_length = min;
        self.default_part_length = default;
        self
    }

    /// Sets the allowed wall width range.
    #[must_use]
    pub fn with_wall_width_range(mut self, min: f64, max: f64) -> Self {
        self.min_wall_width = min;
        self.max_wall_width = max;
        self
    }

    /// Sets the angular tolerance.
    #[must_use]
    pub fn with_angle_tolerance(mut self, tolerance: f64) -> Self {
        self.angle_tolerance = tolerance;
        self
    }

    /// Sets the wall part snap step.
    #[must_use]
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Checks that every parameter is finite and in range.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` naming the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("stroke_width", self.stroke_width),
            ("part_search_radius", self.part_search_radius),
            ("part_max_distance_sq", self.part_max_distance_sq),
            ("min_part_length", self.min_part_length),
            ("default_part_length", self.default_part_length),
            ("min_point_size", self.min_point_size),
            ("default_point_size", self.default_point_size),
            ("min_wall_width", self.min_wall_width),
            ("max_wall_width", self.max_wall_width),
            ("angle_tolerance", self.angle_tolerance),
            ("max_stub_length", self.max_stub_length),
            ("grid_size", self.grid_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(OperationError::InvalidInput(format!(
                    "{name} must be positive and finite, got {value}"
                ))
                .into());
            }
        }
        if self.min_wall_width > self.max_wall_width {
            return Err(OperationError::InvalidInput(
                "min_wall_width exceeds max_wall_width".to_owned(),
            )
            .into());
        }
        if self.min_part_length > self.default_part_length {
            return Err(OperationError::InvalidInput(
                "min_part_length exceeds default_part_length".to_owned(),
            )
            .into());
        }
        Ok(())
    }
}
