//! Noisy XOR with a 2 → 64 → 64 → 1 network.
//!
//! Run with `RUST_LOG=info cargo run --example xor` to see per-epoch progress.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tensorflux::nn::{LossKind, Network, TrainConfig, init, metrics};
use tensorflux::tensors::Tensor;

/// `n` XOR samples cycling through the four corners, jittered by ±0.1.
fn xor_data(n: usize, rng: &mut StdRng) -> tensorflux::Result<(Tensor<f64, 2>, Tensor<f64, 2>)> {
    let mut x = Tensor::zeros([n, 2])?;
    let mut y = Tensor::zeros([n, 1])?;
    for i in 0..n {
        let a = if i % 4 < 2 { 0.0 } else { 1.0 };
        let b = if i % 2 == 0 { 0.0 } else { 1.0 };
        x.set([i, 0], a + rng.random_range(-0.1..0.1))?;
        x.set([i, 1], b + rng.random_range(-0.1..0.1))?;
        y.set([i, 0], if a == b { 0.0 } else { 1.0 })?;
    }
    Ok((x, y))
}

fn main() -> tensorflux::Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(2024);
    let (x_train, y_train) = xor_data(4000, &mut rng)?;
    let (x_test, y_test) = xor_data(1000, &mut rng)?;
    println!("train: {:?}, test: {:?}", x_train.shape(), x_test.shape());

    let mut init_rng = StdRng::seed_from_u64(7);
    let mut net = Network::<f64>::with_seed(7);
    net.add_dense_with_init(2, 64, init::normal(&mut init_rng, 0.0, 0.1)?, init::zeros())?
        .add_relu()
        .add_dense(64, 64)?
        .add_relu()
        .add_dense(64, 1)?
        .add_sigmoid();
    println!("{net:?}");

    let config = TrainConfig::new(200, 64, 0.05)
        .with_loss(LossKind::BinaryCrossEntropy)
        .with_shuffle(true)
        .with_seed(1);

    let start = Instant::now();
    let losses = net.train(&x_train, &y_train, &config)?;
    let elapsed = start.elapsed().as_secs_f64();
    println!(
        "trained {} epochs in {elapsed:.2}s, final loss {:.5}",
        losses.len(),
        losses.last().copied().unwrap_or(f64::NAN)
    );

    let pred = net.predict(&x_test)?;
    let acc = metrics::binary_accuracy(&pred, &y_test, 0.5)?;
    println!("test accuracy: {:.2}%", acc * 100.0);

    let corners = Tensor::from_vec([4, 2], vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0])?;
    println!("corners:\n{}", net.predict(&corners)?);
    Ok(())
}
