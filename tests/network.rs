use tensorflux::nn::{LossKind, Network, OptimizerKind, TrainConfig, init, metrics};
use tensorflux::tensor;
use tensorflux::tensors::Tensor;
use tensorflux::{Error, TensorError};

fn xor() -> (Tensor<f64, 2>, Tensor<f64, 2>) {
    (
        tensor!([[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]),
        tensor!([[0.0], [1.0], [1.0], [0.0]]),
    )
}

fn xor_network(seed: u64) -> Network<f64> {
    let mut net = Network::<f64>::with_seed(seed);
    net.add_dense(2, 64)
        .unwrap()
        .add_relu()
        .add_dense(64, 64)
        .unwrap()
        .add_relu()
        .add_dense(64, 1)
        .unwrap()
        .add_sigmoid();
    net
}

#[test]
fn test_xor_end_to_end() {
    let (x, y) = xor();
    let mut net = xor_network(42);
    let config = TrainConfig::new(5000, 4, 0.1).with_loss(LossKind::BinaryCrossEntropy);
    let losses = net.train(&x, &y, &config).unwrap();
    assert_eq!(losses.len(), 5000);
    assert!(losses[4999] < losses[0]);

    let pred = net.predict(&x).unwrap();
    let acc = metrics::binary_accuracy(&pred, &y, 0.5).unwrap();
    assert!(acc >= 0.99, "xor accuracy {acc}, predictions {pred}");
}

#[test]
fn test_untrained_predict_shape() {
    let mut net = xor_network(0);
    let x = Tensor::<f64, 2>::zeros([7, 2]).unwrap();
    let out = net.predict(&x).unwrap();
    assert_eq!(out.shape(), &[7, 1]);
    assert!(out.iter().all(|&p| p > 0.0 && p < 1.0));
}

#[test]
fn test_wrong_input_width() {
    let mut net = xor_network(0);
    let x = Tensor::<f64, 2>::zeros([3, 5]).unwrap();
    assert!(matches!(
        net.predict(&x),
        Err(Error::Tensor(TensorError::DimensionMismatch { .. }))
    ));
}

#[test]
fn test_training_is_deterministic() {
    let (x, y) = xor();
    let config = TrainConfig::new(30, 2, 0.05)
        .with_shuffle(true)
        .with_seed(11)
        .with_optimizer(OptimizerKind::adam());

    let mut a = xor_network(5);
    let mut b = xor_network(5);
    let la = a.train(&x, &y, &config).unwrap();
    let lb = b.train(&x, &y, &config).unwrap();
    assert_eq!(la, lb);
    assert_eq!(a.predict(&x).unwrap(), b.predict(&x).unwrap());
}

#[test]
fn test_adam_reduces_loss() {
    let (x, y) = xor();
    let mut net = xor_network(9);
    let config = TrainConfig::new(200, 4, 0.01)
        .with_loss(LossKind::Mse)
        .with_optimizer(OptimizerKind::adam());
    let losses = net.train(&x, &y, &config).unwrap();
    assert!(losses[199] < losses[0]);
}

#[test]
fn test_softmax_requires_cross_entropy() {
    let x: Tensor<f64, 2> = tensor!([[1.0, 0.0], [0.0, 1.0]]);
    let y: Tensor<f64, 2> = tensor!([[1.0, 0.0], [0.0, 1.0]]);
    let mut net = Network::<f64>::with_seed(1);
    net.add_dense(2, 2).unwrap().add_softmax();

    let bce = TrainConfig::new(5, 2, 0.1);
    assert!(matches!(
        net.train(&x, &y, &bce),
        Err(Error::IncompatibleLoss(_))
    ));

    let cce = bce.with_loss(LossKind::CategoricalCrossEntropy);
    let losses = net.train(&x, &y, &cce).unwrap();
    assert!(losses[4] < losses[0]);
}

#[test]
fn test_softmax_classifier_learns() {
    let x: Tensor<f64, 2> = tensor!([
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.9, 0.1, 0.0],
        [0.0, 0.8, 0.2]
    ]);
    let y: Tensor<f64, 2> = tensor!([
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0]
    ]);
    let mut net = Network::<f64>::with_seed(2);
    net.add_dense(3, 8).unwrap().add_relu().add_dense(8, 3).unwrap().add_softmax();
    let config = TrainConfig::new(500, 5, 0.5).with_loss(LossKind::CategoricalCrossEntropy);
    net.train(&x, &y, &config).unwrap();

    let pred = net.predict(&x).unwrap();
    assert_eq!(metrics::categorical_accuracy(&pred, &y).unwrap(), 1.0);
}

#[test]
fn test_sample_mismatch() {
    let (x, _) = xor();
    let y: Tensor<f64, 2> = tensor!([[0.0], [1.0]]);
    let mut net = xor_network(0);
    assert_eq!(
        net.train(&x, &y, &TrainConfig::new(1, 2, 0.1)),
        Err(Error::SampleMismatch {
            inputs: 4,
            targets: 2
        })
    );
}

#[test]
fn test_invalid_batch_size() {
    let (x, y) = xor();
    let mut net = xor_network(0);
    assert!(matches!(
        net.train(&x, &y, &TrainConfig::new(1, 0, 0.1)),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_last_batch_may_be_short() {
    let (x, y) = xor();
    let mut net = xor_network(3);
    let losses = net.train(&x, &y, &TrainConfig::new(3, 3, 0.1)).unwrap();
    assert_eq!(losses.len(), 3);
    assert!(losses.iter().all(|l| l.is_finite()));
}

#[test]
fn test_custom_initializers() {
    let (x, y) = xor();
    let mut net = Network::<f64>::new();
    net.add_dense_with_init(2, 1, init::constant(0.0), init::constant(0.0))
        .unwrap()
        .add_sigmoid();
    assert_eq!(net.predict(&x).unwrap().data(), &[0.5, 0.5, 0.5, 0.5]);
    assert_eq!(net.parameter_count(), 3);

    let loss = net.evaluate(&x, &y, LossKind::BinaryCrossEntropy).unwrap();
    assert!((loss - core::f64::consts::LN_2).abs() < 1e-12);
}
