mod common;

use bcast_cpu::config::Config;
use bcast_cpu::{BcastError, BinaryOp, BroadcastMode, ElementwiseArgs, Executor, Layout, Tensor};
use common::{randn, rng};

#[test]
fn trailing() -> Result<(), BcastError> {
    let mut rng = rng();
    let x = randn(&[2, 3, 4, 5], &mut rng)?;
    let y = randn(&[4, 5], &mut rng)?;
    let z = Executor::default().add(&x, &y, &BroadcastMode::Trailing)?;
    assert_eq!(z.shape(), x.shape());
    for i in 0..2 {
        for j in 0..3 {
            for k in 0..4 {
                for l in 0..5 {
                    assert_eq!(
                        z.get(&[i, j, k, l]),
                        Some(x.get(&[i, j, k, l]).unwrap() + y.get(&[k, l]).unwrap())
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn intermediate_axes() -> Result<(), BcastError> {
    let mut rng = rng();
    let x = randn(&[2, 3, 4, 5], &mut rng)?;
    let y = randn(&[3, 4], &mut rng)?;
    let z = Executor::default().add(&x, &y, &BroadcastMode::AxisOffset(1))?;
    assert_eq!(z.shape(), x.shape());
    for i in 0..2 {
        for j in 0..3 {
            for k in 0..4 {
                for l in 0..5 {
                    assert_eq!(
                        z.get(&[i, j, k, l]),
                        Some(x.get(&[i, j, k, l]).unwrap() + y.get(&[j, k]).unwrap())
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn first_axis() -> Result<(), BcastError> {
    let mut rng = rng();
    let x = randn(&[2, 3, 4, 5], &mut rng)?;
    let y = randn(&[2], &mut rng)?;
    let z = Executor::default().add(&x, &y, &BroadcastMode::AxisOffset(0))?;
    for i in 0..2 {
        for j in 0..3 {
            for k in 0..4 {
                for l in 0..5 {
                    assert_eq!(
                        z.get(&[i, j, k, l]),
                        Some(x.get(&[i, j, k, l]).unwrap() + y.get(&[i]).unwrap())
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn constant() -> Result<(), BcastError> {
    let mut rng = rng();
    let x = randn(&[2, 3, 4, 5], &mut rng)?;
    let y = randn(&[1], &mut rng)?;
    let c = y.data()[0];
    let z = Executor::default().add(&x, &y, &BroadcastMode::Trailing)?;
    assert_eq!(z.shape(), x.shape());
    for (z, x) in z.data().iter().zip(x.data()) {
        assert_eq!(*z, x + c);
    }
    Ok(())
}

#[test]
fn scalar() -> Result<(), BcastError> {
    let ex = Executor::default();
    let mut rng = rng();
    for dims in [&[1][..], &[7][..], &[2, 3][..], &[2, 3, 4, 5][..], &[1, 1, 1][..]] {
        let x = randn(dims, &mut rng)?;
        let y = Tensor::scalar(0.25f32);
        let z = ex.add(&x, &y, &BroadcastMode::Trailing)?;
        assert_eq!(z.shape(), x.shape());
        for (z, x) in z.data().iter().zip(x.data()) {
            assert_eq!(*z, x + 0.25);
        }
    }
    let z = ex.add(&Tensor::scalar(2i32), &Tensor::scalar(3i32), &BroadcastMode::Trailing)?;
    assert_eq!(z.shape().rank(), 0);
    assert_eq!(z.data(), &[5]);
    Ok(())
}

#[test]
fn semantic_nchw() -> Result<(), BcastError> {
    let mut rng = rng();
    let x = randn(&[2, 3, 4, 5], &mut rng)?;
    let y = randn(&[3], &mut rng)?;
    let z = Executor::default().add(&x, &y, &BroadcastMode::semantic("C", Layout::NCHW))?;
    for i in 0..2 {
        for j in 0..3 {
            for k in 0..4 {
                for l in 0..5 {
                    assert_eq!(
                        z.get(&[i, j, k, l]),
                        Some(x.get(&[i, j, k, l]).unwrap() + y.get(&[j]).unwrap())
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn semantic_nhwc() -> Result<(), BcastError> {
    let mut rng = rng();
    let x = randn(&[2, 3, 4, 5], &mut rng)?;
    let y = randn(&[5], &mut rng)?;
    let ex = Executor::default();
    let z = ex.add(&x, &y, &BroadcastMode::semantic("C", Layout::NHWC))?;
    // Channel is the last axis, so this is the same as trailing broadcast
    assert_eq!(z, ex.add(&x, &y, &BroadcastMode::Trailing)?);
    for i in 0..2 {
        for j in 0..3 {
            for k in 0..4 {
                for l in 0..5 {
                    assert_eq!(
                        z.get(&[i, j, k, l]),
                        Some(x.get(&[i, j, k, l]).unwrap() + y.get(&[l]).unwrap())
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn operator_args() -> Result<(), BcastError> {
    let mut rng = rng();
    let ex = Executor::default();
    let x = randn(&[2, 3, 4, 5], &mut rng)?;
    let y = randn(&[3, 4], &mut rng)?;
    let z = ex.run(BinaryOp::Add, &x, &y, &ElementwiseArgs::broadcast().axis(1))?;
    assert_eq!(z, ex.add(&x, &y, &BroadcastMode::AxisOffset(1))?);
    assert_eq!(
        ex.run(BinaryOp::Add, &x, &y, &ElementwiseArgs::broadcast().axis(-3)),
        Err(BcastError::AxisOutOfRange { axis: -3, max: 2 })
    );
    assert_eq!(
        ex.run(BinaryOp::Add, &x, &y, &ElementwiseArgs::broadcast().axis(0).axis_str("N")),
        Err(BcastError::ConflictingAxis {
            axis: 0,
            name: "N".into()
        })
    );

    let c = randn(&[3], &mut rng)?;
    let z = ex.run(BinaryOp::Add, &x, &c, &ElementwiseArgs::broadcast().axis_str("C"))?;
    assert_eq!(z, ex.add(&x, &c, &BroadcastMode::AxisOffset(1))?);

    let c = randn(&[5], &mut rng)?;
    let args = ElementwiseArgs::broadcast().axis_str("C").order("NHWC")?;
    let z = ex.run(BinaryOp::Add, &x, &c, &args)?;
    assert_eq!(z, ex.add(&x, &c, &BroadcastMode::AxisOffset(3))?);

    // Without broadcast flag shapes must match
    let z = ex.run(BinaryOp::Add, &x, &x, &ElementwiseArgs::default())?;
    assert_eq!(z, ex.add(&x, &x, &BroadcastMode::Trailing)?);
    assert!(matches!(
        ex.run(BinaryOp::Add, &x, &c, &ElementwiseArgs::default()),
        Err(BcastError::BroadcastDisabled { .. })
    ));
    Ok(())
}

#[test]
fn configured_default_layout() -> Result<(), BcastError> {
    let mut rng = rng();
    let ex = Executor::new(Config {
        default_layout: Layout::NHWC,
        ..Config::default()
    });
    let x = randn(&[2, 3, 4, 5], &mut rng)?;
    let c = randn(&[5], &mut rng)?;
    let z = ex.run(BinaryOp::Add, &x, &c, &ElementwiseArgs::broadcast().axis_str("C"))?;
    assert_eq!(z, ex.add(&x, &c, &BroadcastMode::AxisOffset(3))?);
    Ok(())
}
