//! Shared constants for matrix-factorization parameters.

/// Smallest mini-batch size accepted by `check`.
pub const MIN_BATCH_SIZE: i64 = 10;

/// Batch size meaning "use all data in one batch".
pub const FULL_BATCH: i64 = -1;

/// Convergence threshold used when an early-stop spec does not carry one.
pub const DEFAULT_EPS: f64 = 1e-4;

/// Mapping key naming the early-stop method.
pub const EARLY_STOP_KEY: &str = "early_stop";

/// Mapping key carrying the early-stop threshold.
pub const EPS_KEY: &str = "eps";

/// Mapping key naming the optimizer.
pub const OPTIMIZER_KEY: &str = "optimizer";

/// Optimizer keyword arguments that must be non-negative numbers.
pub const NON_NEGATIVE_OPTIMIZER_ARGS: [&str; 2] = ["decay", "learning_rate"];

/// Optimizer used by the shared matrix-factorization params.
pub const DEFAULT_OPTIMIZER: &str = "SGD";

/// Optimizer used by the hetero params.
pub const DEFAULT_HETERO_OPTIMIZER: &str = "sgd";

/// Early-stop method when none is given.
pub const DEFAULT_EARLY_STOP: &str = "diff";

/// Loss function when none is given.
pub const DEFAULT_LOSS: &str = "mse";

/// Training iterations when none are given.
pub const DEFAULT_MAX_ITER: i64 = 100;

/// Latent factor size when none is given.
pub const DEFAULT_EMBED_DIM: i64 = 10;

/// Iterations aggregated at once by hetero training.
pub const DEFAULT_AGGREGATE_ITERS: i64 = 1;

/// Cross-validation mode for vertically partitioned data.
pub const HETERO: &str = "hetero";

/// Cross-validation mode for horizontally partitioned data.
pub const HOMO: &str = "homo";

/// Party holding the labels.
pub const GUEST: &str = "guest";

/// Party holding features only.
pub const HOST: &str = "host";

/// Party coordinating aggregation.
pub const ARBITER: &str = "arbiter";
