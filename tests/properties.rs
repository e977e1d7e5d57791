use glam::{DVec2, dvec2};
use gradient_editor::{
    Action, AffineTransform, ControlPoints, Focus, GradientEditor, GradientStop, GradientType,
    GradientValue, Size, base_anchors, points_to_transform, screen_to_gradient_position,
    transform_to_points,
};

const SIZE: Size = Size::new(400.0, 300.0);

fn close(a: DVec2, b: DVec2) -> bool {
    a.abs_diff_eq(b, 1e-9)
}

/// A spread of control point configurations, including rotated, mirrored
/// and off-canvas ones.
fn configurations() -> Vec<ControlPoints> {
    let mut out = Vec::new();
    for (i, angle) in [0.0_f64, 0.4, 1.3, 2.9, -2.0].into_iter().enumerate() {
        let a = dvec2(0.2 + 0.1 * i as f64, 0.5 - 0.3 * i as f64);
        let axis = DVec2::from_angle(angle) * (0.3 + 0.2 * i as f64);
        let side = if i % 2 == 0 { 1.0 } else { -1.0 };
        let c = a + axis.perp() * 0.7 * side;
        out.push(ControlPoints::new(a, a + axis, c));
    }
    out
}

#[test]
fn identity_for_base_anchors() {
    for kind in GradientType::ALL {
        let t = points_to_transform(&base_anchors(kind), kind);
        assert!(t.approx_eq(&AffineTransform::IDENTITY, 1e-12), "{kind}: {t}");
    }
}

#[test]
fn transform_round_trips_through_points() {
    for kind in GradientType::ALL {
        for points in configurations() {
            let back = transform_to_points(&points_to_transform(&points, kind), kind);
            assert!(close(back.a, points.a), "{kind}: {back:?} vs {points:?}");
            assert!(close(back.b, points.b), "{kind}: {back:?} vs {points:?}");
            if kind != GradientType::Linear {
                assert!(close(back.c, points.c), "{kind}: {back:?} vs {points:?}");
            }
        }
    }
}

#[test]
fn dragged_offsets_stay_in_unit_range() {
    let value = GradientValue::new(
        AffineTransform::IDENTITY,
        vec![GradientStop::new(0.0, 0), GradientStop::new(0.5, 1), GradientStop::new(1.0, 2)],
    )
    .expect("valid");
    for kind in GradientType::ALL {
        let mut editor = GradientEditor::new(kind, SIZE, value.clone());
        let marker = editor.layout().stops[1].position;
        editor.pointer_down(marker);
        assert_eq!(editor.focus(), Focus::Stop(1), "{kind}");
        let far = [
            dvec2(-500.0, 20.0),
            dvec2(2000.0, 150.0),
            dvec2(200.0, -900.0),
            dvec2(10.0, 1e6),
        ];
        for pointer in far {
            editor.pointer_move(pointer);
            let offset = editor.value().stops[1].offset;
            assert!((0.0..=1.0).contains(&offset), "{kind}: {offset}");
        }
        editor.pointer_up();
        let offsets: Vec<f64> = editor.value().offsets().collect();
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]), "{kind}: {offsets:?}");
    }
}

#[test]
fn focus_follows_dragged_stop_through_sort() {
    let stops: Vec<_> = [0.1, 0.3, 0.5, 0.7, 0.9]
        .iter()
        .enumerate()
        .map(|(i, &o)| GradientStop::new(o, i))
        .collect();
    let value = GradientValue::new(AffineTransform::IDENTITY, stops).expect("valid");

    for (dragged, target_x) in [(0, 380.0), (4, 20.0), (2, 250.0), (1, 0.0)] {
        let mut editor = GradientEditor::new(GradientType::Linear, SIZE, value.clone());
        let marker = editor.layout().stops[dragged].position;
        editor.pointer_down(marker);
        editor.pointer_move(dvec2(target_x, marker.y));
        editor.pointer_up();

        let Focus::Stop(index) = editor.focus() else {
            panic!("focus lost after dragging stop {dragged}");
        };
        assert_eq!(editor.value().stops[index].color, dragged);
    }
}

#[test]
fn delete_never_drops_below_two() {
    let mut editor = GradientEditor::new(
        GradientType::Radial,
        SIZE,
        GradientValue::new(
            AffineTransform::IDENTITY,
            vec![
                GradientStop::new(0.0, 'a'),
                GradientStop::new(0.4, 'b'),
                GradientStop::new(1.0, 'c'),
            ],
        )
        .expect("valid"),
    );
    for _ in 0..5 {
        editor.dispatch(Action::DeleteStop(0));
    }
    assert_eq!(editor.value().stops.len(), 2);
}

#[test]
fn sweep_quarter_turn_points_down() {
    let points = base_anchors(GradientType::Sweep);
    let offset = screen_to_gradient_position(200.0, 250.0, GradientType::Sweep, &points, SIZE);
    assert!((offset - 0.25).abs() < 1e-9, "{offset}");
}
