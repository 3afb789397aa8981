#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::animation::*;
    use crate::*;
    use web_time::{Duration, Instant};

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#9b9b9b");
        assert_eq!(c, Color(155, 155, 155, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));
    }

    #[test]
    fn test_locals_default_and_nesting() {
        assert_eq!(screen_metrics(), ScreenMetrics::default());
        assert_eq!(shimmer_config().offset_for_width, 4.0);

        let outer = ScreenMetrics {
            width: 400.0,
            height: 800.0,
        };
        let inner = ScreenMetrics {
            width: 320.0,
            height: 640.0,
        };
        with_screen_metrics(outer, || {
            assert_eq!(screen_metrics().width, 400.0);
            with_screen_metrics(inner, || {
                assert_eq!(screen_metrics().width, 320.0);
                // other locals are untouched
                assert_eq!(placeholder_theme(), PlaceholderTheme::default());
            });
            assert_eq!(screen_metrics().width, 400.0);
        });
        assert_eq!(screen_metrics(), ScreenMetrics::default());
    }

    #[test]
    fn test_locals_frame_popped_on_unwind() {
        let metrics = ScreenMetrics {
            width: 1.0,
            height: 2.0,
        };
        let result = std::panic::catch_unwind(|| {
            with_screen_metrics(metrics, || {
                assert_eq!(screen_metrics(), metrics);
                panic!("render failed");
            })
        });
        assert!(result.is_err());
        assert_eq!(screen_metrics(), ScreenMetrics::default());
    }

    #[test]
    fn test_config_override() {
        let cfg = ShimmerConfig {
            synthetic_item_count: 2,
            ..Default::default()
        };
        with_shimmer_config(cfg, || {
            assert_eq!(shimmer_config().synthetic_item_count, 2);
            assert_eq!(shimmer_config().default_margin, 3.0);
        });
    }

    #[test]
    fn test_looping_animation_deterministic() {
        let t0 = Instant::now();
        set_clock(Box::new(TestClock { t: t0 }));

        let mut a = LoopingAnimation::start(Duration::from_millis(1000), 1.0, Easing::Linear);
        set_clock(Box::new(TestClock {
            t: t0 + Duration::from_millis(250),
        }));
        assert!((a.value() - 0.25).abs() < 0.001);

        // wraps around after a full period
        set_clock(Box::new(TestClock {
            t: t0 + Duration::from_millis(1500),
        }));
        assert!((a.value() - 0.5).abs() < 0.001);

        a.stop();
        assert!(!a.is_running());
        set_clock(Box::new(TestClock {
            t: t0 + Duration::from_millis(1900),
        }));
        assert!((a.value() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_looping_animation_end_scales() {
        let t0 = Instant::now();
        set_clock(Box::new(TestClock { t: t0 }));
        let a = LoopingAnimation::start(Duration::from_millis(2000), 0.8, Easing::Linear);
        set_clock(Box::new(TestClock {
            t: t0 + Duration::from_millis(1000),
        }));
        assert!((a.value() - 0.4).abs() < 0.001);
    }

    #[test]
    fn test_overlay_frame() {
        let overlay = ShimmerOverlay {
            sweep_width: 100.0,
            duration: Duration::from_millis(1000),
            sweep_end: 1.0,
        };
        let start = overlay.frame(0.0);
        assert_eq!(start.translate_x, -100.0);
        assert_eq!(start.opacity, 0.5);

        let mid = overlay.frame(0.5);
        assert!(mid.translate_x.abs() < 0.001);
        assert!((mid.opacity - 0.25).abs() < 0.001);

        let end = overlay.frame(1.0);
        assert_eq!(end.translate_x, 100.0);
        assert_eq!(end.opacity, 0.0);
    }

    #[test]
    fn test_style_merged_prefers_other() {
        let base = ViewStyle::new().width(10.0).margin(2.0).font_size(12.0);
        let top = ViewStyle::new().width(20.0).background(Color::BLACK);
        let m = base.merged(&top);
        assert_eq!(m.width, Some(Dimension::Points(20.0)));
        assert_eq!(m.margin, Some(2.0));
        assert_eq!(m.font_size, Some(12.0));
        assert_eq!(m.background, Some(Brush::Solid(Color::BLACK)));
    }

    #[test]
    fn test_aspect_ratio_is_set() {
        assert!(AspectRatio::Ratio(1.5).is_set());
        assert!(AspectRatio::Auto.is_set());
        assert!(!AspectRatio::Ratio(0.0).is_set());
        assert!(!AspectRatio::Ratio(f32::NAN).is_set());
        assert_eq!(AspectRatio::Auto.usable(), None);
        assert_eq!(AspectRatio::Ratio(-1.0).usable(), None);
    }

    #[test]
    fn test_to_taffy_unsized_is_flexible() {
        let s = ViewStyle::new().padding_left(4.0).padding(2.0).to_taffy();
        assert_eq!(s.flex_grow, 1.0);
        assert_eq!(s.flex_direction, taffy::FlexDirection::Column);
        assert_eq!(s.padding.left, taffy::style::LengthPercentage::length(4.0));
        assert_eq!(s.padding.right, taffy::style::LengthPercentage::length(2.0));

        let fixed = ViewStyle::new().width(50.0).row().to_taffy();
        assert_eq!(fixed.flex_grow, 0.0);
        assert_eq!(fixed.flex_direction, taffy::FlexDirection::Row);
    }

    #[test]
    fn test_view_class() {
        let text = View::new(1, ViewKind::Text { text: "a".into() });
        assert_eq!(text.class(), NodeClass::Leaf);

        let empty_box = View::new(2, ViewKind::Box);
        assert_eq!(empty_box.class(), NodeClass::Leaf);

        let container = View::new(3, ViewKind::Box).child(text.clone());
        assert_eq!(container.class(), NodeClass::Container);

        let comp = View::new(4, ViewKind::Component(Component::new("C", View::default)));
        assert_eq!(comp.class(), NodeClass::Composite { expandable: true });
        let with_kids = comp.clone().child(text);
        assert_eq!(with_kids.class(), NodeClass::Composite { expandable: false });

        let list = View::new(5, ViewKind::LazyList(LazyList::untemplated(Vec::new())));
        assert_eq!(list.class(), NodeClass::VirtualizedList);
    }

    #[test]
    fn test_expand_non_component_fails() {
        let err = View::new(1, ViewKind::Box).expand().unwrap_err();
        assert_eq!(err, ExpandError::NotExpandable { kind: "Box" });
        assert_eq!(err.to_string(), "Box nodes cannot be expanded");
    }

    #[test]
    fn test_lazy_list_render_items() {
        let list = LazyList::new(vec!["a".to_string(), "bb".to_string()], |item, index| {
            let text = item.cloned().unwrap_or_default();
            View::new(index as u64, ViewKind::Text { text })
        });
        let items = list.render_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].kind, ViewKind::Text { text: "bb".into() });

        // foreign data reaches the template as None
        let foreign = LazyList {
            data: Rc::from(vec![Rc::new(5u32) as Rc<dyn std::any::Any>]),
            ..list.clone()
        };
        assert_eq!(foreign.render_items()[0].kind, ViewKind::Text { text: String::new() });

        assert!(LazyList::untemplated(vec![Rc::new(1u8) as Rc<dyn std::any::Any>]).render_items().is_empty());
    }
}
