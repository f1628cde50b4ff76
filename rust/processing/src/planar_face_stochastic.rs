// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bimscan_geometry::SpdMatrix6;
use std::path::Path;

use crate::csv::{self, CsvBatch};
use crate::error::Result;
use crate::id::Id;

const SOURCE: &str = "PlanarFaceStochastic";

/// Plane parameter covariance estimated for one face from its points
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarFaceStochastic {
    pub id: Id,
    pub number_of_points: i64,
    pub cxx: SpdMatrix6,
}

impl PlanarFaceStochastic {
    pub const CSV_HEADER: &'static str = "StateId;ObjectId;FaceId;NumberOfPoints;Cxx";
    pub const FIELD_COUNT: usize = 5;

    pub fn new(id: Id, number_of_points: i64, cxx: SpdMatrix6) -> Self {
        Self {
            id,
            number_of_points,
            cxx,
        }
    }

    pub fn to_csv_line(&self) -> String {
        format!("{};{};{}", self.id, self.number_of_points, self.cxx.to_array_string())
    }

    pub fn parse_csv_line(line: &str) -> Result<PlanarFaceStochastic> {
        let line = csv::non_empty(line, SOURCE)?;
        let f = csv::fields(line);
        if f.len() != Self::FIELD_COUNT {
            return Err(csv::unreadable(SOURCE, line));
        }
        let number_of_points = f[3]
            .trim()
            .parse::<i64>()
            .map_err(|_| csv::unreadable(SOURCE, line))?;
        let cxx = SpdMatrix6::parse_array(f[4]).map_err(|_| csv::unreadable(SOURCE, line))?;
        Ok(Self::new(Id::new(f[0], f[1], f[2]), number_of_points, cxx))
    }

    pub fn read_csv(path: impl AsRef<Path>) -> Result<CsvBatch<PlanarFaceStochastic>> {
        csv::read_file(path.as_ref(), SOURCE, Self::parse_csv_line)
    }

    pub fn write_csv<'a>(
        path: impl AsRef<Path>,
        faces: impl IntoIterator<Item = &'a PlanarFaceStochastic>,
    ) -> Result<usize> {
        csv::write_file(
            path.as_ref(),
            Self::CSV_HEADER,
            faces.into_iter().map(PlanarFaceStochastic::to_csv_line),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_round_trip() {
        let mut coeffs = SpdMatrix6::UNIT.to_array();
        coeffs[1] = 0.125;
        coeffs[20] = 3.5e-7;
        let face = PlanarFaceStochastic::new(Id::new("s", "o", "f_3"), 1234, SpdMatrix6::from_array(coeffs));
        let line = face.to_csv_line();
        assert!(line.starts_with("s;o;f_3;1234;1 0.125 0 "));
        let back = PlanarFaceStochastic::parse_csv_line(&line).unwrap();
        assert_eq!(back, face);
        assert_eq!(back.cxx.get(5, 5), 3.5e-7);
    }

    #[test]
    fn test_unreadable_lines() {
        assert!(PlanarFaceStochastic::parse_csv_line("").is_err());
        assert!(PlanarFaceStochastic::parse_csv_line("s;o;f;12").is_err());
        assert!(PlanarFaceStochastic::parse_csv_line("s;o;f;many;1 0 0").is_err());
        let short_cxx = format!("s;o;f;12;{}", "1 ".repeat(20).trim_end());
        assert!(PlanarFaceStochastic::parse_csv_line(&short_cxx).is_err());
    }
}
