/// Finds the font scale at which a line fits its container.
///
/// Starting from `1.0`, the scale is lowered by `step` while the content,
/// whose height is taken to be proportional to the scale, is still taller
/// than the container. The result never drops below `min_scale`.
pub fn fit(content_height: f64, container_height: f64, step: f64, min_scale: f64) -> f64 {
    let min_scale = min_scale.min(1.0);
    if content_height <= container_height {
        return 1.0;
    }
    if !(step > 0.0) {
        return min_scale;
    }

    let mut steps = 0u32;
    loop {
        steps += 1;
        // Counting whole steps keeps the result free of accumulated rounding.
        let scale = (1.0 - step * f64::from(steps)).max(min_scale);
        if scale <= min_scale || content_height * scale <= container_height {
            return scale;
        }
    }
}
