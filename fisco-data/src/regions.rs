//! Registry of the regions an income tax scale can be loaded for.

use fisco_core::Regime;

/// Static metadata of a region; its scale comes from the scale CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub regime: Regime,
}

const fn common(
    id: &'static str,
    name: &'static str,
) -> RegionInfo {
    RegionInfo {
        id,
        name,
        regime: Regime::Common,
    }
}

const fn foral(
    id: &'static str,
    name: &'static str,
) -> RegionInfo {
    RegionInfo {
        id,
        name,
        regime: Regime::Foral,
    }
}

/// Scale name of the state half, shared by every common-regime region.
pub const NATIONAL_SCALE: &str = "national";

pub const REGIONS: [RegionInfo; 17] = [
    common("andalucia", "Andalucía"),
    common("aragon", "Aragón"),
    common("asturias", "Principado de Asturias"),
    common("baleares", "Illes Balears"),
    common("canarias", "Canarias"),
    common("cantabria", "Cantabria"),
    common("castilla-la-mancha", "Castilla-La Mancha"),
    common("castilla-y-leon", "Castilla y León"),
    common("cataluna", "Cataluña"),
    common("extremadura", "Extremadura"),
    common("galicia", "Galicia"),
    common("la-rioja", "La Rioja"),
    common("madrid", "Comunidad de Madrid"),
    common("murcia", "Región de Murcia"),
    common("valencia", "Comunitat Valenciana"),
    foral("navarra", "Comunidad Foral de Navarra"),
    foral("pais-vasco", "País Vasco"),
];
