//! End-to-end properties of the public tone-mapping API.
//!
//! Run with: `cargo test -p tonal-core`

use tonal_core::{
    ScalingKind, ToneMapCurve, ToneMapParams, convert, equal, generate, is_noop, registry,
    sample, select_auto,
};

const EPSILON: f32 = 1e-5;

fn hdr_to_sdr(curve: &'static ToneMapCurve) -> ToneMapParams {
    ToneMapParams {
        curve: Some(curve),
        input_scaling: ScalingKind::Nits,
        output_scaling: ScalingKind::Nits,
        lut_size: 128,
        input_min: 0.0,
        input_max: 1000.0,
        output_min: 0.0,
        output_max: 203.0,
        ..Default::default()
    }
}

fn lut_positions(params: &ToneMapParams) -> Vec<f32> {
    let last = (params.lut_size - 1) as f32;
    (0..params.lut_size)
        .map(|i| {
            let t = i as f32 / last;
            if i + 1 == params.lut_size {
                params.input_max
            } else {
                params.input_min + (params.input_max - params.input_min) * t
            }
        })
        .collect()
}

#[test]
fn test_scaling_roundtrip_all_pairs() {
    // Norm values from deep shadow up to 10000 cd/m²
    let norms = [0.01, 0.1, 0.5, 1.0, 4.0, 20.0, 49.0];
    for from in ScalingKind::ALL {
        for to in ScalingKind::ALL {
            for n in norms {
                let x = convert(n, ScalingKind::Norm, from);
                let back = convert(convert(x, from, to), to, from);
                let tol = 1e-5 * x.abs().max(1e-3);
                assert!(
                    (back - x).abs() <= tol,
                    "{from} -> {to} -> {from}: {x} came back as {back}"
                );
            }
        }
    }
}

#[test]
fn test_scaling_zero_is_fixed_point() {
    for from in ScalingKind::ALL {
        for to in ScalingKind::ALL {
            assert_eq!(convert(0.0, from, to), 0.0);
        }
    }
}

#[test]
fn test_linear_pq_halving_example() {
    let params = ToneMapParams {
        curve: registry::lookup("linear"),
        input_scaling: ScalingKind::Pq,
        output_scaling: ScalingKind::Pq,
        lut_size: 5,
        input_min: 0.0,
        input_max: 1.0,
        output_min: 0.0,
        output_max: 0.5,
        ..Default::default()
    };
    let lut = generate(&params);
    assert_eq!(lut.len(), 5);
    assert!(lut.windows(2).all(|w| w[0] < w[1]));
    assert!(lut[0].abs() < EPSILON);
    assert!((lut[4] - 0.5).abs() < EPSILON);
    for w in lut.windows(2) {
        assert!((w[1] - w[0] - 0.125).abs() < EPSILON);
    }
}

#[test]
fn test_absent_curve_clips_example() {
    let params = ToneMapParams {
        curve: None,
        input_min: 0.0,
        input_max: 2.0,
        output_min: 0.0,
        output_max: 1.0,
        ..Default::default()
    };
    assert_eq!(sample(1.5, &params), 1.0);
}

#[test]
fn test_clip_is_identity_inside_output_range() {
    let params = ToneMapParams {
        curve: Some(&registry::CLIP),
        lut_size: 33,
        input_max: 3.0,
        output_max: 2.0,
        ..Default::default()
    };
    let lut = generate(&params);
    for (x, y) in lut_positions(&params).into_iter().zip(lut) {
        assert!((y - x.min(2.0)).abs() < EPSILON, "{x} -> {y}");
    }
}

#[test]
fn test_generate_agrees_with_sample() {
    for &curve in registry::list() {
        let params = hdr_to_sdr(curve);
        let lut = generate(&params);
        for (i, x) in lut_positions(&params).into_iter().enumerate() {
            let s = sample(x, &params);
            assert!(
                (lut[i] - s).abs() <= 1e-4 * s.abs().max(1.0),
                "{curve} entry {i}: lut {} vs sample {s}",
                lut[i]
            );
        }
    }
}

/// Parameter values worth sweeping for `curve`: its range ends and default.
fn param_sweep(curve: &ToneMapCurve) -> Vec<f32> {
    match curve.param {
        Some(p) => vec![p.min, p.default, p.max],
        None => vec![0.0],
    }
}

/// Forward configurations from near-equal peaks up to a full HDR reduction,
/// in both relative and PQ scaling.
fn forward_configs(curve: &'static ToneMapCurve) -> Vec<ToneMapParams> {
    let mut configs = Vec::new();
    for peak in [1.01, 1.1, 1.25, 2.0, 4.926] {
        configs.push(ToneMapParams {
            curve: Some(curve),
            lut_size: 1024,
            input_max: peak,
            output_max: 1.0,
            ..Default::default()
        });
        configs.push(ToneMapParams {
            curve: Some(curve),
            input_scaling: ScalingKind::Pq,
            output_scaling: ScalingKind::Pq,
            lut_size: 1024,
            input_max: convert(peak, ScalingKind::Norm, ScalingKind::Pq),
            output_max: convert(1.0, ScalingKind::Norm, ScalingKind::Pq),
            ..Default::default()
        });
    }
    configs.push(ToneMapParams {
        lut_size: 1024,
        input_max: 250.0,
        ..hdr_to_sdr(curve)
    });
    configs.push(ToneMapParams {
        lut_size: 1024,
        ..hdr_to_sdr(curve)
    });
    configs
}

#[test]
fn test_forward_luts_are_monotonic() {
    for &curve in registry::list() {
        for base in forward_configs(curve) {
            for param in param_sweep(curve) {
                let params = ToneMapParams { param, ..base };
                let lut = generate(&params);
                for (i, w) in lut.windows(2).enumerate() {
                    assert!(
                        w[1] >= w[0] - 1e-5 * w[0].abs(),
                        "{curve} param {param} decreases at entry {i}: {} -> {} ({params:?})",
                        w[0],
                        w[1]
                    );
                }
            }
        }
    }
}

#[test]
fn test_mobius_high_knee_stays_monotonic() {
    // Knee at the top of its range with barely any headroom to compress
    let params = ToneMapParams {
        param: 0.99,
        lut_size: 4096,
        input_max: 250.0,
        ..hdr_to_sdr(&registry::MOBIUS)
    };
    let lut = generate(&params);
    assert!(lut.windows(2).all(|w| w[1] >= w[0]));
    assert!((lut[4095] - 203.0).abs() < 1e-2, "{}", lut[4095]);
}

#[test]
fn test_outputs_stay_in_output_range() {
    for &curve in registry::list() {
        let params = ToneMapParams {
            output_min: 0.1,
            ..hdr_to_sdr(curve)
        };
        for y in generate(&params) {
            assert!((0.1..=203.0).contains(&y), "{curve} produced {y}");
        }
    }
}

#[test]
fn test_inverse_luts_reach_output_peak() {
    for name in ["bt2446a", "spline", "linear"] {
        let params = ToneMapParams {
            curve: registry::lookup(name),
            input_scaling: ScalingKind::Nits,
            output_scaling: ScalingKind::Nits,
            lut_size: 64,
            input_max: 203.0,
            output_max: 1000.0,
            ..Default::default()
        };
        let lut = generate(&params);
        assert!(lut[63] > 203.0, "{name} did not expand: {}", lut[63]);
        assert!(lut[63] <= 1000.0);
        assert!(lut.windows(2).all(|w| w[1] >= w[0] - 1e-3), "{name}");
    }
}

#[test]
fn test_noop_configs_map_identically() {
    let configs = [
        ToneMapParams::default(),
        ToneMapParams {
            output_max: 2.0,
            ..Default::default()
        },
        ToneMapParams {
            curve: Some(&registry::CLIP),
            input_scaling: ScalingKind::Pq,
            output_scaling: ScalingKind::Pq,
            input_max: 0.6,
            output_max: 0.6,
            ..Default::default()
        },
    ];
    for params in configs {
        assert!(is_noop(&params), "{params:?}");
        let lut = generate(&params);
        for (x, y) in lut_positions(&params).into_iter().zip(lut) {
            let want = convert(x, params.input_scaling, params.output_scaling);
            assert!((y - want).abs() < 1e-4, "{x} -> {y}");
        }
    }
}

#[test]
fn test_non_noop_configs_change_some_sample() {
    let configs = [
        hdr_to_sdr(&registry::BT2390),
        ToneMapParams {
            output_max: 0.5,
            ..Default::default()
        },
        ToneMapParams {
            output_min: 0.2,
            ..Default::default()
        },
    ];
    for params in configs {
        assert!(!is_noop(&params), "{params:?}");
        let lut = generate(&params);
        let changed = lut_positions(&params)
            .into_iter()
            .zip(lut)
            .any(|(x, y)| (convert(x, params.input_scaling, params.output_scaling) - y).abs() > 1e-3);
        assert!(changed, "{params:?}");
    }
}

#[test]
fn test_equal_uses_curve_identity() {
    let a = hdr_to_sdr(&registry::SPLINE);
    let b = hdr_to_sdr(registry::lookup("spline").unwrap());
    assert!(equal(&a, &b));

    let copy: &'static ToneMapCurve = Box::leak(Box::new(registry::SPLINE.clone()));
    assert!(!equal(&a, &hdr_to_sdr(copy)));
}

#[test]
fn test_auto_is_deterministic() {
    let params = hdr_to_sdr(&registry::AUTO);
    let first = generate(&params);
    let second = generate(&params);
    assert_eq!(first, second);

    let picked = select_auto(
        convert(1000.0, ScalingKind::Nits, ScalingKind::Norm),
        convert(203.0, ScalingKind::Nits, ScalingKind::Norm),
    );
    assert_eq!(picked.name, "bt2446a");
    assert_eq!(params.effective_curve().name, "bt2446a");
}

#[test]
fn test_auto_matches_its_pick() {
    let auto = hdr_to_sdr(&registry::AUTO);
    let pick = hdr_to_sdr(auto.effective_curve());
    assert_eq!(generate(&auto), generate(&pick));
}

#[test]
fn test_json_config_drives_engine() {
    let json = r#"{
        "curve": "reinhard",
        "input_scaling": "nits",
        "output_scaling": "nits",
        "lut_size": 16,
        "input_max": 1000.0,
        "output_max": 203.0
    }"#;
    let params = ToneMapParams::from_json(json).unwrap();
    assert!(equal(
        &params,
        &ToneMapParams {
            lut_size: 16,
            ..hdr_to_sdr(&registry::REINHARD)
        }
    ));

    let back = ToneMapParams::from_json(&params.to_json().unwrap()).unwrap();
    assert_eq!(generate(&params), generate(&back));
}

#[test]
fn test_large_luts_run_parallel_and_match_small_ones() {
    let small = ToneMapParams {
        lut_size: 11,
        ..hdr_to_sdr(&registry::HABLE)
    };
    let large = ToneMapParams {
        lut_size: 10_001,
        ..small
    };
    let small_lut = generate(&small);
    let large_lut = generate(&large);
    for (i, y) in small_lut.iter().enumerate() {
        assert!((large_lut[i * 1000] - y).abs() <= 1e-4 * y.abs().max(1.0));
    }
}
