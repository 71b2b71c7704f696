//! Inverse projections checked against tile geometry and closed-form formulas.

use projection::{ProjectionDefinition, ProjectionFamily, Sinusoidal};
use test_utils::{assert_approx_eq, assert_coords_approx_eq, tiles, MODIS_SPHERE_RADIUS, MODIS_TILE_SIZE};

#[test]
fn test_tile_size_is_ten_degrees() {
    let proj = Sinusoidal::modis();
    let (_, lat) = proj.to_geographic(0.0, MODIS_TILE_SIZE).unwrap();
    assert_approx_eq!(lat, 10.0, 1e-6);
}

#[test]
fn test_tile_corners() {
    let proj = Sinusoidal::new(MODIS_SPHERE_RADIUS).unwrap();

    // h17v04 upper-left: 50N, 10 degrees of equatorial arc west of Greenwich
    let (ul_x, ul_y, _, lr_y) = tiles::H17V04;
    let (lon, lat) = proj.to_geographic(ul_x, ul_y).unwrap();
    assert_approx_eq!(lat, 50.0, 1e-6);
    assert_approx_eq!(lon, -10.0 / 50f64.to_radians().cos(), 1e-6);

    let (_, lat) = proj.to_geographic(0.0, lr_y).unwrap();
    assert_approx_eq!(lat, 40.0, 1e-6);

    // h09v05 upper-left: 40N, 90 degrees of equatorial arc west
    let (ul_x, ul_y, _, _) = tiles::H09V05;
    let (lon, lat) = proj.to_geographic(ul_x, ul_y).unwrap();
    assert_coords_approx_eq!((lon, lat), (-90.0 / 40f64.to_radians().cos(), 40.0), 1e-6);
}

#[test]
fn test_forward_inverse_over_globe() {
    let proj = Sinusoidal::modis();
    for lat in (-85..=85).step_by(17) {
        for lon in (-175..=175).step_by(25) {
            let (x, y) = proj.from_geographic(lon as f64, lat as f64).unwrap();
            let back = proj.to_geographic(x, y).unwrap();
            assert_coords_approx_eq!((back.0, back.1), (lon as f64, lat as f64), 1e-9);
        }
    }
}

#[test]
fn test_anti_meridian_tile_edges() {
    let proj = Sinusoidal::modis();
    let (ul_x, ul_y, _, _) = tiles::H00V08;

    // Western corner at 10N lies beyond the 180th meridian
    assert!(proj.to_geographic(ul_x, ul_y).is_none());
    // The same x on the equator is still inside the domain
    let (lon, _) = proj.to_geographic(ul_x + 1.0, 0.0).unwrap();
    assert!(lon > -180.0 && lon < -179.9);
}

#[test]
fn test_mercator_passthrough() {
    let def = ProjectionDefinition::from_metadata("MERC", &[MODIS_SPHERE_RADIUS]).unwrap();
    assert_eq!(def.family(), ProjectionFamily::Proj4("merc".to_string()));

    let (x, y) = (1_000_000.0, 5_000_000.0);
    let (lon, lat) = def.to_geographic(x, y).unwrap();
    let expected_lon = (x / MODIS_SPHERE_RADIUS).to_degrees();
    let expected_lat = (2.0 * (y / MODIS_SPHERE_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2)
        .to_degrees();
    assert_coords_approx_eq!((lon, lat), (expected_lon, expected_lat), 1e-6);
}

#[test]
fn test_sinusoidal_definition_matches_struct() {
    let def = ProjectionDefinition::from_metadata("GCTP_SNSOID", &[MODIS_SPHERE_RADIUS, 0.0]).unwrap();
    let proj = Sinusoidal::modis();
    let (ul_x, ul_y, lr_x, lr_y) = tiles::H17_H18_V04;
    for (x, y) in [(ul_x, ul_y), (lr_x, lr_y), (0.0, 0.0)] {
        assert_eq!(def.to_geographic(x, y), proj.to_geographic(x, y));
    }
}
