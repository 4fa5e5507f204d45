use bar_morph::api::{ChartController, ChartControllerConfig, ManualClock};
use bar_morph::core::{ChartData, ChartMode, DataDiagnostic, Series, Viewport};
use bar_morph::render::NullRenderer;
use proptest::prelude::*;

fn controller() -> (ChartController<ManualClock>, ManualClock) {
    let clock = ManualClock::new(0.0);
    let config = ChartControllerConfig::new(Viewport::new(300.0, 200.0));
    let controller = ChartController::new(config, clock.clone()).expect("controller init");
    (controller, clock)
}

fn assert_frame_is_renderable(controller: &ChartController<ManualClock>, now_ms: f64) {
    let snapshot = controller.snapshot(now_ms);
    for bar in &snapshot.bars {
        assert!(bar.geometry.is_finite(), "{bar:?}");
        assert!(bar.geometry.height >= 0.0, "{bar:?}");
        assert!(bar.geometry.y >= 0.0 && bar.geometry.bottom() <= 200.0 + 1e-9, "{bar:?}");
    }
    for tick in &snapshot.ticks {
        assert!(tick.value.is_finite() && tick.position_y.is_finite());
    }
    let mut renderer = NullRenderer::default();
    controller
        .render(&mut renderer, now_ms)
        .expect("frame should validate");
}

#[test]
fn overflowing_stack_saturates_instead_of_producing_nan() {
    let (mut controller, clock) = controller();
    controller.set_data(ChartData::new(
        ["Jan"],
        vec![Series::new("S0", [1e308]), Series::new("S1", [1e308])],
    ));

    assert_eq!(controller.scales().value.y_max(), f64::MAX);
    assert_eq!(
        controller.diagnostics(),
        &[DataDiagnostic::StackTotalSaturated { category_index: 0 }]
    );
    assert_frame_is_renderable(&controller, 0.0);

    controller.set_mode(ChartMode::Grouped);
    clock.set(600.0);
    assert_frame_is_renderable(&controller, 300.0);
    assert_frame_is_renderable(&controller, 600.0);
}

#[test]
fn single_value_near_max_keeps_ticks_finite() {
    let (mut controller, _clock) = controller();
    controller.set_data(ChartData::new(["Jan"], vec![Series::new("S0", [1.7e308])]));
    let y_max = controller.scales().value.y_max();
    assert!(y_max.is_finite() && y_max >= 1.7e308);
    assert_frame_is_renderable(&controller, 0.0);

    controller.set_data(ChartData::new(["Jan"], vec![Series::new("S0", [f64::MAX])]));
    assert_eq!(controller.scales().value.y_max(), f64::MAX);
    assert_eq!(controller.target_geometry(0, "S0").expect("Jan/S0").y, 0.0);
    assert_frame_is_renderable(&controller, 600.0);
}

proptest! {
    #[test]
    fn extreme_values_never_reach_the_renderer_as_nan(
        values in prop::collection::vec(
            prop_oneof![0.0f64..1.0e3, 1.0e300f64..=f64::MAX, Just(f64::MAX)],
            1..12
        ),
        grouped in any::<bool>(),
        sample_at in 0.0f64..700.0
    ) {
        let (mut controller, _clock) = controller();
        let categories: Vec<String> = (0..3).map(|index| format!("C{index}")).collect();
        let series = values
            .chunks(3)
            .enumerate()
            .map(|(index, chunk)| Series::new(format!("S{index}"), chunk.iter().copied()))
            .collect();
        controller.set_data(ChartData::new(categories, series));
        if grouped {
            controller.set_mode(ChartMode::Grouped);
        }

        let y_max = controller.scales().value.y_max();
        prop_assert!(y_max.is_finite() && y_max >= 1.0);

        let snapshot = controller.snapshot(sample_at);
        for bar in &snapshot.bars {
            prop_assert!(bar.geometry.is_finite());
            prop_assert!(bar.geometry.height >= 0.0);
        }
        for tick in &snapshot.ticks {
            prop_assert!(tick.value.is_finite());
            prop_assert!(tick.position_y.is_finite());
        }
        let mut renderer = NullRenderer::default();
        prop_assert!(controller.render(&mut renderer, sample_at).is_ok());
    }
}
