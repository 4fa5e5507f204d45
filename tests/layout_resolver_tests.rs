use approx::assert_abs_diff_eq;
use bar_morph::core::{
    ChartData, ChartMode, PlotMargins, ScaleTuning, Series, Viewport, normalize, resolve_layout,
};

fn invoice_data() -> ChartData {
    ChartData::new(
        ["Jan", "Feb"],
        vec![
            Series::new("A", [10.0, 20.0]),
            Series::new("B", [5.0, 10.0]),
        ],
    )
}

fn resolve(data: &ChartData, viewport: Viewport) -> bar_morph::core::ResolvedLayout {
    let (data, _) = normalize(data);
    resolve_layout(&data, viewport, PlotMargins::default(), ScaleTuning::default())
}

#[test]
fn stacked_jan_segments_map_through_value_scale() {
    let layout = resolve(&invoice_data(), Viewport::new(300.0, 200.0));
    // y_max = ceil(30 * 1.05) = 32
    assert_eq!(layout.scales.value.y_max(), 32.0);

    let a = layout.stacked.get(0, "A").expect("Jan/A");
    let b = layout.stacked.get(0, "B").expect("Jan/B");
    assert_abs_diff_eq!(a.y, 137.5, epsilon = 1e-9);
    assert_abs_diff_eq!(a.height, 62.5, epsilon = 1e-9);
    assert_abs_diff_eq!(b.y, 106.25, epsilon = 1e-9);
    assert_abs_diff_eq!(b.height, 31.25, epsilon = 1e-9);
    assert_abs_diff_eq!(b.bottom(), a.y, epsilon = 1e-9);

    let band_x = layout.scales.category.position(0).expect("Jan band");
    assert_eq!(a.x, band_x);
    assert_eq!(a.width, layout.scales.category.bandwidth());
    assert_eq!(b.x, a.x);
}

#[test]
fn stacked_heights_sum_to_category_total() {
    let layout = resolve(&invoice_data(), Viewport::new(300.0, 200.0));
    let value = layout.scales.value;
    for category_index in 0..2 {
        let total = layout
            .stacks
            .category_total(category_index)
            .expect("category total");
        let sum: f64 = ["A", "B"]
            .iter()
            .map(|key| layout.stacked.get(category_index, key).expect("bar").height)
            .sum();
        assert_abs_diff_eq!(
            sum,
            value.value_to_pixel(0.0) - value.value_to_pixel(total),
            epsilon = 1e-9
        );
    }
}

#[test]
fn grouped_jan_bars_sit_side_by_side_inside_the_band() {
    let layout = resolve(&invoice_data(), Viewport::new(300.0, 200.0));
    let a = layout.grouped.get(0, "A").expect("Jan/A");
    let b = layout.grouped.get(0, "B").expect("Jan/B");

    assert_abs_diff_eq!(a.height, 62.5, epsilon = 1e-9);
    assert_abs_diff_eq!(b.height, 31.25, epsilon = 1e-9);
    assert_abs_diff_eq!(a.height / b.height, 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(a.bottom(), 200.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b.bottom(), 200.0, epsilon = 1e-9);

    let band_x = layout.scales.category.position(0).expect("Jan band");
    let band_end = band_x + layout.scales.category.bandwidth();
    assert!(a.x >= band_x);
    assert!(a.right() <= b.x);
    assert!(b.right() <= band_end + 1e-9);
    assert_eq!(a.width, b.width);
}

#[test]
fn both_grids_exist_after_one_resolution() {
    let layout = resolve(&invoice_data(), Viewport::new(300.0, 200.0));
    assert_eq!(layout.stacked.len(), 4);
    assert_eq!(layout.grouped.len(), 4);
    assert_eq!(layout.grid(ChartMode::Stacked), &layout.stacked);
    assert_eq!(layout.grid(ChartMode::Grouped), &layout.grouped);
}

#[test]
fn resizing_width_rescales_bands_proportionally() {
    let narrow = resolve(&invoice_data(), Viewport::new(300.0, 200.0));
    let wide = resolve(&invoice_data(), Viewport::new(600.0, 200.0));

    for category_index in 0..2 {
        for key in ["A", "B"] {
            let before = narrow.stacked.get(category_index, key).expect("narrow bar");
            let after = wide.stacked.get(category_index, key).expect("wide bar");
            assert_abs_diff_eq!(after.width, before.width * 2.0, epsilon = 1e-9);
            assert_abs_diff_eq!(after.x, before.x * 2.0, epsilon = 1e-9);
            assert_eq!(after.height, before.height);
        }
    }
    let jan = wide.stacked.get(0, "A").expect("Jan").width;
    let feb = wide.stacked.get(1, "A").expect("Feb").width;
    assert_abs_diff_eq!(jan / feb, 1.0, epsilon = 1e-12);
}

#[test]
fn zero_size_container_produces_all_zero_geometry() {
    let layout = resolve(&invoice_data(), Viewport::new(0.0, 0.0));
    for grid in [&layout.stacked, &layout.grouped] {
        for (_, _, geometry) in grid.iter() {
            assert_eq!(geometry.x, 0.0);
            assert_eq!(geometry.y, 0.0);
            assert_eq!(geometry.width, 0.0);
            assert_eq!(geometry.height, 0.0);
        }
    }
}

#[test]
fn negative_values_never_produce_negative_or_nan_heights() {
    let data = ChartData::new(
        ["Jan", "Feb"],
        vec![Series::new("A", [-5.0, 3.0]), Series::new("B", [2.0, -5.0])],
    );
    let layout = resolve(&data, Viewport::new(300.0, 200.0));
    for grid in [&layout.stacked, &layout.grouped] {
        for (_, _, geometry) in grid.iter() {
            assert!(geometry.is_finite());
            assert!(geometry.height >= 0.0);
            assert!(geometry.width >= 0.0);
        }
    }
    assert_eq!(layout.stacked.get(0, "A").expect("Jan/A").height, 0.0);
    assert_eq!(layout.grouped.get(1, "B").expect("Feb/B").height, 0.0);
}

#[test]
fn all_zero_data_uses_unit_value_range() {
    let data = ChartData::new(["Jan"], vec![Series::new("A", [0.0])]);
    let layout = resolve(&data, Viewport::new(100.0, 100.0));
    assert_eq!(layout.scales.value.y_max(), 1.0);
    let bar = layout.stacked.get(0, "A").expect("Jan/A");
    assert_eq!(bar.height, 0.0);
    assert_eq!(bar.y, 100.0);
}

#[test]
fn margins_shift_geometry_into_container_pixels() {
    let (data, _) = normalize(&invoice_data());
    let margins = PlotMargins::new(10.0, 5.0, 20.0, 40.0);
    let plain = resolve_layout(
        &data,
        Viewport::new(345.0, 230.0),
        PlotMargins::default(),
        ScaleTuning::default(),
    );
    let shifted = resolve_layout(
        &data,
        Viewport::new(345.0, 230.0),
        margins,
        ScaleTuning::default(),
    );

    assert_eq!(shifted.scales.inner_width, 300.0);
    assert_eq!(shifted.scales.inner_height, 200.0);
    let bar = shifted.grouped.get(0, "A").expect("Jan/A");
    assert_abs_diff_eq!(bar.bottom(), 210.0, epsilon = 1e-9);
    assert!(bar.x > 40.0);
    assert_ne!(plain.grouped.get(0, "A"), Some(bar));
}

#[test]
fn unknown_identities_resolve_to_none() {
    let layout = resolve(&invoice_data(), Viewport::new(300.0, 200.0));
    assert_eq!(layout.stacked.get(2, "A"), None);
    assert_eq!(layout.grouped.get(0, "Z"), None);
}
