use clap::Parser;
use ritk_displacement::{compute_field, OutputFormat, RunArgs, TransformSpec};

#[derive(Parser)]
struct Harness {
    #[command(flatten)]
    run: RunArgs,
}

fn parse(args: &[&str]) -> RunArgs {
    let mut argv = vec!["ritk-displacement"];
    argv.extend_from_slice(args);
    Harness::try_parse_from(argv).unwrap().run
}

#[test]
fn test_no_flags_is_identity_scenario() {
    let config = parse(&[]).into_config();
    assert_eq!(config.size, [10, 10, 10]);
    assert_eq!(config.spacing, [1.0, 1.0, 1.0]);
    assert_eq!(config.origin, [0.0, 0.0, 0.0]);
    assert_eq!(config.transform, TransformSpec::Identity);
    assert!(config.use_reference_image);
    assert_eq!(config.format, OutputFormat::Text);
}

#[test]
fn test_flags_are_parsed() {
    let config = parse(&[
        "--size", "4,5,6",
        "--spacing", "0.5,0.5,2",
        "--origin", "-1,0,1",
        "--transform", "scale:2,1,1",
        "--no-reference-image",
        "--chunks", "3",
        "--format", "json",
    ])
    .into_config();

    assert_eq!(config.size, [4, 5, 6]);
    assert_eq!(config.spacing, [0.5, 0.5, 2.0]);
    assert_eq!(config.origin, [-1.0, 0.0, 1.0]);
    assert_eq!(config.transform, TransformSpec::Scale([2.0, 1.0, 1.0]));
    assert!(!config.use_reference_image);
    assert_eq!(config.chunks, 3);
    assert_eq!(config.format, OutputFormat::Json);
}

#[test]
fn test_last_reference_flag_wins() {
    assert!(parse(&["--no-reference-image", "--use-reference-image"]).into_config().use_reference_image);
    assert!(!parse(&["--use-reference-image", "--no-reference-image"]).into_config().use_reference_image);
}

#[test]
fn test_negative_triples_are_values_not_flags() {
    let config = parse(&["--origin", "-2.5,0,0", "--spacing", "-1,1,1"]).into_config();
    assert_eq!(config.origin, [-2.5, 0.0, 0.0]);
    assert_eq!(config.spacing, [-1.0, 1.0, 1.0]);

    // The filter, not the parser, rejects the spacing
    let device = Default::default();
    assert!(compute_field(&config, &device).is_err());
}

#[test]
fn test_bad_values_are_rejected() {
    assert!(Harness::try_parse_from(["x", "--size", "10,10"]).is_err());
    assert!(Harness::try_parse_from(["x", "--transform", "rotate:1,2,3"]).is_err());
    assert!(Harness::try_parse_from(["x", "--format", "yaml"]).is_err());
}

#[test]
fn test_explicit_grid_matches_reference_grid() {
    let device = Default::default();
    let args = ["--size", "3,4,5", "--spacing", "2,1,0.5", "--origin", "1,2,3", "--transform", "scale:2,2,2"];

    let with_reference = compute_field(&parse(&args).into_config(), &device).unwrap();
    let mut explicit_args = args.to_vec();
    explicit_args.push("--no-reference-image");
    let explicit = compute_field(&parse(&explicit_args).into_config(), &device).unwrap();

    assert_eq!(with_reference.geometry(), explicit.geometry());
    let a = with_reference.host_vectors().unwrap();
    let b = explicit.host_vectors().unwrap();
    assert!(a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-6));

    // Scale 2 about the origin moves the first voxel (1, 2, 3) by itself
    let first = with_reference.vector_at([0, 0, 0]).unwrap();
    assert!((first[0] - 1.0).abs() < 1e-5);
    assert!((first[1] - 2.0).abs() < 1e-5);
    assert!((first[2] - 3.0).abs() < 1e-5);
}
