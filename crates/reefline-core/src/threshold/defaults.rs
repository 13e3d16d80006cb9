use crate::ids::AquariumId;
use crate::notification::NotificationMethod;

use super::{Bounds, ParameterThreshold};

/// Starting thresholds for a tropical freshwater tank. Temperature is in °F.
pub fn freshwater(
    aquarium_id: &AquariumId,
    methods: &[NotificationMethod],
) -> Vec<ParameterThreshold> {
    let make = |name: &str| ParameterThreshold::new(aquarium_id.clone(), name, methods.to_vec());

    vec![
        make("Ammonia")
            .with_ideal(Bounds::max_only(0.0))
            .with_warning(Bounds::max_only(0.25))
            .with_critical(Bounds::max_only(0.5)),
        make("Nitrite")
            .with_ideal(Bounds::max_only(0.0))
            .with_warning(Bounds::max_only(0.25))
            .with_critical(Bounds::max_only(0.5)),
        make("Nitrate")
            .with_ideal(Bounds::max_only(20.0))
            .with_warning(Bounds::max_only(40.0))
            .with_critical(Bounds::max_only(80.0)),
        make("pH")
            .with_ideal(Bounds::between(6.5, 7.5))
            .with_warning(Bounds::between(6.0, 8.0))
            .with_critical(Bounds::between(5.5, 8.5)),
        make("Temperature")
            .with_ideal(Bounds::between(75.0, 80.0))
            .with_warning(Bounds::between(72.0, 84.0))
            .with_critical(Bounds::between(68.0, 88.0)),
    ]
}
