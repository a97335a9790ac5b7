use std::sync::Arc;

use alpha_domain::EnumType;

pub fn gender() -> Arc<EnumType> {
    EnumType::new("Gender")
        .auto("MALE")
        .auto("FEMALE")
        .auto("UNKNOWN")
        .build()
}

/// Declares a `NONE` sentinel member.
pub fn car_type() -> Arc<EnumType> {
    EnumType::new("CarType")
        .member("NONE", 0)
        .auto("SEDAN")
        .auto("COUPE")
        .auto("STATION")
        .build()
}

pub fn ac_type() -> Arc<EnumType> {
    EnumType::new("AcType")
        .member("NONE", 0)
        .auto("FIXED_WING")
        .auto("HELICOPTER")
        .build()
}
