//! Common test fixtures for StructMetadata tests.
//!
//! The metadata blocks below follow the layout written by the MODIS/MAIAC
//! processing chain: tab-indented `GROUP`/`OBJECT` blocks, bare enumerated
//! codes, quoted names, numeric tuples and a trailing `END` line.

/// Sphere radius used by MODIS sinusoidal grids (meters).
pub const MODIS_SPHERE_RADIUS: f64 = 6371007.181;

/// Edge length of one MODIS sinusoidal tile (meters).
pub const MODIS_TILE_SIZE: f64 = 1111950.519667;

/// Corner coordinates of well-known tiles as `(ul_x, ul_y, lr_x, lr_y)`.
pub mod tiles {
    /// Tile h17v04 (western Europe / north Africa edge, 40-50 N).
    pub const H17V04: (f64, f64, f64, f64) =
        (-1111950.519667, 5559752.598333, 0.0, 4447802.078667);

    /// Two tiles wide, straddling the central meridian between 40 and 50 N.
    pub const H17_H18_V04: (f64, f64, f64, f64) =
        (-1111950.519667, 5559752.598333, 1111950.519667, 4447802.078667);

    /// Tile h09v05 (western United States, 30-40 N).
    pub const H09V05: (f64, f64, f64, f64) =
        (-10007554.677, 4447802.078667, -8895604.157333, 3335851.559);

    /// Tile h00v08 at the anti-meridian, just north of the equator. Its
    /// western cells lie outside the sinusoidal domain.
    pub const H00V08: (f64, f64, f64, f64) =
        (-20015109.354, 1111950.519667, -18903158.834333, 0.0);
}

/// MCD19A2 StructMetadata.0 for tile h17v04 with two grids (1 km and 5 km).
pub const MCD19A2_H17V04: &str = "GROUP=SwathStructure
END_GROUP=SwathStructure
GROUP=GridStructure
\tGROUP=GRID_1
\t\tGridName=\"grid1km\"
\t\tXDim=1200
\t\tYDim=1200
\t\tUpperLeftPointMtrs=(-1111950.519667,5559752.598333)
\t\tLowerRightMtrs=(0.000000,4447802.078667)
\t\tProjection=GCTP_SNSOID
\t\tProjParams=(6371007.181000,0,0,0,0,0,0,0,0,0,0,0,0)
\t\tSphereCode=-1
\t\tGridOrigin=HDFE_GD_UL
\t\tGROUP=Dimension
\t\t\tOBJECT=Dimension_1
\t\t\t\tDimensionName=\"Orbits\"
\t\t\t\tSize=4
\t\t\tEND_OBJECT=Dimension_1
\t\tEND_GROUP=Dimension
\t\tGROUP=DataField
\t\t\tOBJECT=DataField_1
\t\t\t\tDataFieldName=\"Optical_Depth_047\"
\t\t\t\tDataType=DFNT_INT16
\t\t\t\tDimList=(\"Orbits\",\"YDim\",\"XDim\")
\t\t\t\tCompressionType=HDFE_COMP_DEFLATE
\t\t\t\tDeflateLevel=8
\t\t\tEND_OBJECT=DataField_1
\t\t\tOBJECT=DataField_2
\t\t\t\tDataFieldName=\"Optical_Depth_055\"
\t\t\t\tDataType=DFNT_INT16
\t\t\t\tDimList=(\"Orbits\",\"YDim\",\"XDim\")
\t\t\t\tCompressionType=HDFE_COMP_DEFLATE
\t\t\t\tDeflateLevel=8
\t\t\tEND_OBJECT=DataField_2
\t\tEND_GROUP=DataField
\t\tGROUP=MergedFields
\t\tEND_GROUP=MergedFields
\tEND_GROUP=GRID_1
\tGROUP=GRID_2
\t\tGridName=\"grid5km\"
\t\tXDim=240
\t\tYDim=240
\t\tUpperLeftPointMtrs=(-1111950.519667,5559752.598333)
\t\tLowerRightMtrs=(0.000000,4447802.078667)
\t\tProjection=GCTP_SNSOID
\t\tProjParams=(6371007.181000,0,0,0,0,0,0,0,0,0,0,0,0)
\t\tSphereCode=-1
\t\tGridOrigin=HDFE_GD_UL
\t\tGROUP=Dimension
\t\tEND_GROUP=Dimension
\t\tGROUP=DataField
\t\tEND_GROUP=DataField
\t\tGROUP=MergedFields
\t\tEND_GROUP=MergedFields
\tEND_GROUP=GRID_2
END_GROUP=GridStructure
GROUP=PointStructure
END_GROUP=PointStructure
END
\0\0\0";

/// Two sibling `OBJECT=GRID_1` blocks with different dimensions.
pub const DUPLICATE_GRID_1: &str = "GROUP=GridStructure
\tOBJECT=GRID_1
\t\tXDim=10
\t\tYDim=5
\t\tUpperLeftPointMtrs=(-1000.0,500.0)
\t\tLowerRightMtrs=(1000.0,-500.0)
\t\tProjection=GCTP_SNSOID
\t\tProjParams=(6371007.181,0,0)
\tEND_OBJECT=GRID_1
\tOBJECT=GRID_1
\t\tXDim=20
\t\tYDim=8
\t\tUpperLeftPointMtrs=(-2000.0,800.0)
\t\tLowerRightMtrs=(2000.0,-800.0)
\t\tProjection=GCTP_SNSOID
\t\tProjParams=(6371007.181,0,0)
\tEND_OBJECT=GRID_1
END_GROUP=GridStructure
END
";

/// Render a single-grid StructMetadata block.
///
/// `corners` is `(ul_x, ul_y, lr_x, lr_y)`; `params` is written verbatim
/// inside the `ProjParams` parentheses.
pub fn single_grid_metadata(
    corners: (f64, f64, f64, f64),
    x_dim: usize,
    y_dim: usize,
    projection: &str,
    params: &str,
) -> String {
    let (ul_x, ul_y, lr_x, lr_y) = corners;
    format!(
        "GROUP=SwathStructure\n\
         END_GROUP=SwathStructure\n\
         GROUP=GridStructure\n\
         \tGROUP=GRID_1\n\
         \t\tGridName=\"test_grid\"\n\
         \t\tXDim={x_dim}\n\
         \t\tYDim={y_dim}\n\
         \t\tUpperLeftPointMtrs=({ul_x:.6},{ul_y:.6})\n\
         \t\tLowerRightMtrs=({lr_x:.6},{lr_y:.6})\n\
         \t\tProjection={projection}\n\
         \t\tProjParams=({params})\n\
         \t\tSphereCode=-1\n\
         \t\tGridOrigin=HDFE_GD_UL\n\
         \tEND_GROUP=GRID_1\n\
         END_GROUP=GridStructure\n\
         GROUP=PointStructure\n\
         END_GROUP=PointStructure\n\
         END\n"
    )
}

/// Sinusoidal single-grid metadata on the MODIS sphere.
pub fn sinusoidal_metadata(corners: (f64, f64, f64, f64), x_dim: usize, y_dim: usize) -> String {
    single_grid_metadata(
        corners,
        x_dim,
        y_dim,
        "GCTP_SNSOID",
        "6371007.181000,0,0,0,0,0,0,0,0,0,0,0,0",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_blocks_balance() {
        for text in [MCD19A2_H17V04, DUPLICATE_GRID_1] {
            let opens = text
                .lines()
                .filter(|l| l.trim().starts_with("GROUP=") || l.trim().starts_with("OBJECT="))
                .count();
            let closes = text
                .lines()
                .filter(|l| l.trim().starts_with("END_GROUP=") || l.trim().starts_with("END_OBJECT="))
                .count();
            assert_eq!(opens, closes);
        }
    }

    #[test]
    fn test_single_grid_metadata_contains_fields() {
        let text = sinusoidal_metadata(tiles::H17V04, 12, 6);
        assert!(text.contains("XDim=12"));
        assert!(text.contains("YDim=6"));
        assert!(text.contains("UpperLeftPointMtrs=(-1111950.519667,5559752.598333)"));
        assert!(text.contains("Projection=GCTP_SNSOID"));
    }

    #[test]
    fn test_tile_sizes() {
        let (ul_x, ul_y, lr_x, lr_y) = tiles::H17V04;
        assert!(((lr_x - ul_x) - MODIS_TILE_SIZE).abs() < 1e-3);
        assert!(((ul_y - lr_y) - MODIS_TILE_SIZE).abs() < 1e-3);
    }
}
