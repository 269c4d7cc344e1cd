use csv::Writer;
use serde::Serialize;

use crate::error::Result;
use crate::mesh::data::{CellCenteredData, FieldId};

#[derive(Serialize)]
struct PointData {
    x: f64,
    y: f64,
    density: f64,
}

/// Dump the interior of one field with cell-center coordinates.
pub fn write_to_csv(data: &CellCenteredData, field: FieldId, filename: &str) -> Result<()> {
    let g = data.grid();
    let a = data.field(field);
    let mut writer = Writer::from_path(filename)?;
    for i in g.ilo..=g.ihi {
        for j in g.jlo..=g.jhi {
            let row = PointData {
                x: g.x(i),
                y: g.y(j),
                density: a[[i, j]],
            };
            writer.serialize(row)?;
        }
    }
    writer.flush()?;
    Ok(())
}
