//! Fixed mappings between domain values and the external application's
//! codes and parameter arrays.

use crate::api::{CoordinateSystem, FrameReleases};
use crate::model::elements::{BarRelease, Constraint6, DofType};
use crate::model::geometry::Vector;
use crate::model::loads::LoadAxis;
use crate::model::properties::MaterialKind;

/// Local 1, 2, 3 directions
pub const LOCAL_DIRECTIONS: [i32; 3] = [1, 2, 3];

/// Global X, Y, Z directions
pub const GLOBAL_DIRECTIONS: [i32; 3] = [4, 5, 6];

/// Global X, Y, Z directions, load projected onto the element
pub const PROJECTED_DIRECTIONS: [i32; 3] = [7, 8, 9];

/// Load type code of a distributed frame load
pub const FRAME_FORCE: i32 = 1;
pub const FRAME_MOMENT: i32 = 2;

/// Temperature load type for a uniform temperature change
pub const UNIFORM_TEMPERATURE: i32 = 1;

/// Design procedure codes
pub const DESIGN_FROM_MATERIAL: i32 = 1;
pub const DESIGN_NONE: i32 = 2;

pub fn csys(axis: LoadAxis) -> CoordinateSystem {
    match axis {
        LoadAxis::Global => CoordinateSystem::Global,
        LoadAxis::Local => CoordinateSystem::Local,
    }
}

/// Direction codes for frame loads
pub fn frame_directions(axis: LoadAxis) -> [i32; 3] {
    match axis {
        LoadAxis::Global => GLOBAL_DIRECTIONS,
        LoadAxis::Local => LOCAL_DIRECTIONS,
    }
}

/// Direction codes for area loads
pub fn area_directions(axis: LoadAxis, projected: bool) -> [i32; 3] {
    match (axis, projected) {
        (LoadAxis::Global, true) => PROJECTED_DIRECTIONS,
        (LoadAxis::Global, false) => GLOBAL_DIRECTIONS,
        (LoadAxis::Local, _) => LOCAL_DIRECTIONS,
    }
}

/// Bar-local vector in external local order: local 2 is the domain z axis,
/// local 3 the domain y axis.
pub fn bar_local_to_external(v: Vector) -> Vector {
    Vector::new(v.x, v.z, v.y)
}

/// Components of a bar load vector in the order of [`frame_directions`]
pub fn frame_components(v: Vector, axis: LoadAxis) -> [f64; 3] {
    match axis {
        LoadAxis::Global => v.to_array(),
        LoadAxis::Local => bar_local_to_external(v).to_array(),
    }
}

/// Six-value point load array
pub fn six_values(first: Vector, second: Vector) -> [f64; 6] {
    [first.x, first.y, first.z, second.x, second.y, second.z]
}

/// Restraint flags of a support; springs count as unrestrained
pub fn restraint(support: &Constraint6) -> [bool; 6] {
    support.dofs().map(|dof| matches!(dof, DofType::Fixed))
}

/// Spring stiffnesses of a support, `None` when it has no springs
pub fn springs(support: &Constraint6) -> Option<[f64; 6]> {
    let dofs = support.dofs();
    if dofs.iter().any(|d| matches!(d, DofType::Spring(_))) {
        Some(dofs.map(|d| d.stiffness()))
    } else {
        None
    }
}

/// Reorder bar-local DOFs (x, y, z, rx, ry, rz) into U1, U2, U3, R1, R2, R3
fn external_order(c: &Constraint6) -> [DofType; 6] {
    [c.tx, c.tz, c.ty, c.rx, c.rz, c.ry]
}

/// Release arrays for both bar ends.
///
/// Returns `None` for an unstable release: U1 or R1 released at both ends.
pub fn frame_releases(release: &BarRelease) -> Option<FrameReleases> {
    let start = external_order(&release.start);
    let end = external_order(&release.end);

    let releases = FrameReleases {
        start: start.map(|d| d.is_released()),
        end: end.map(|d| d.is_released()),
        start_springs: start.map(|d| d.stiffness()),
        end_springs: end.map(|d| d.stiffness()),
    };

    let unstable = (releases.start[0] && releases.end[0]) || (releases.start[3] && releases.end[3]);
    if unstable {
        None
    } else {
        Some(releases)
    }
}

/// Material type code of the external application
pub fn material_type(kind: MaterialKind) -> i32 {
    match kind {
        MaterialKind::Steel => 1,
        MaterialKind::Concrete => 2,
        MaterialKind::Timber | MaterialKind::Other => 3,
        MaterialKind::Aluminium => 4,
        MaterialKind::ColdFormed => 5,
        MaterialKind::Rebar => 6,
        MaterialKind::Tendon => 7,
    }
}

/// Section stiffness modifiers in external order
/// (area, As2, As3, torsion, I22, I33, mass, weight)
pub fn section_modifiers(m: &crate::model::properties::SectionModifier) -> [f64; 8] {
    [m.area, m.asz, m.asy, m.j, m.iz, m.iy, 1.0, 1.0]
}

/// Perpendicular insertion offset of one bar end, `[0, z, y]`
pub fn insertion_offset(offset: Option<Vector>) -> [f64; 3] {
    offset.map_or([0.0; 3], |v| [0.0, v.z, v.y])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::geometry::vector;
    use crate::model::properties::SectionModifier;

    #[test]
    fn test_direction_tables() {
        assert_eq!(frame_directions(LoadAxis::Global), [4, 5, 6]);
        assert_eq!(frame_directions(LoadAxis::Local), [1, 2, 3]);
        assert_eq!(area_directions(LoadAxis::Global, true), [7, 8, 9]);
        assert_eq!(area_directions(LoadAxis::Local, true), [1, 2, 3]);
    }

    #[test]
    fn test_local_components_swap_y_and_z() {
        let v = vector(1.0, 2.0, 3.0);
        assert_eq!(frame_components(v, LoadAxis::Global), [1.0, 2.0, 3.0]);
        assert_eq!(frame_components(v, LoadAxis::Local), [1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_support_with_spring() {
        let support = Constraint6 {
            tz: DofType::Spring(5000.0),
            ..Constraint6::pinned()
        };
        assert_eq!(restraint(&support), [true, true, false, false, false, false]);
        assert_eq!(springs(&support), Some([0.0, 0.0, 5000.0, 0.0, 0.0, 0.0]));
        assert_eq!(springs(&Constraint6::fixed()), None);
    }

    #[test]
    fn test_pin_pin_release_maps_to_major_and_minor_bending() {
        let releases = frame_releases(&BarRelease::pin_pin()).unwrap();
        assert_eq!(releases.start, [false, false, false, false, true, true]);
        assert_eq!(releases.end, [false, false, false, false, true, true]);
    }

    #[test]
    fn test_release_swaps_local_axes() {
        let release = BarRelease {
            start: Constraint6 {
                ry: DofType::Spring(10.0),
                ..Constraint6::fixed()
            },
            end: Constraint6::fixed(),
        };
        let releases = frame_releases(&release).unwrap();
        // domain ry is external R3
        assert_eq!(releases.start, [false, false, false, false, false, true]);
        assert_eq!(releases.start_springs[5], 10.0);
    }

    #[test]
    fn test_unstable_release_rejected() {
        let torsion_free = Constraint6 {
            rx: DofType::Free,
            ..Constraint6::fixed()
        };
        let release = BarRelease {
            start: torsion_free,
            end: torsion_free,
        };
        assert!(frame_releases(&release).is_none());

        let axial_one_end = BarRelease {
            start: Constraint6 {
                tx: DofType::Free,
                ..Constraint6::fixed()
            },
            end: Constraint6::fixed(),
        };
        assert!(frame_releases(&axial_one_end).is_some());
    }

    #[test]
    fn test_modifier_order() {
        let m = SectionModifier {
            area: 1.0,
            asy: 2.0,
            asz: 3.0,
            j: 4.0,
            iy: 5.0,
            iz: 6.0,
        };
        assert_eq!(section_modifiers(&m), [1.0, 3.0, 2.0, 4.0, 6.0, 5.0, 1.0, 1.0]);
    }

    #[test]
    fn test_insertion_offset() {
        assert_eq!(insertion_offset(None), [0.0; 3]);
        assert_eq!(insertion_offset(Some(vector(9.0, 0.2, 0.5))), [0.0, 0.5, 0.2]);
    }
}
