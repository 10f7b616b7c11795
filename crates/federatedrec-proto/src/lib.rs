//! Protobuf messages for federatedrec model metadata.
//!
//! The schema lives in `proto/mf_model_meta.proto` and is shared with the
//! other readers of trained-model metadata in the framework, so field names,
//! numbers and types must not drift from it.

#![allow(clippy::derive_partial_eq_without_eq)]

// NOTE: Modules are keyed by the `package` of each `.proto` file, mapped to
// snake_case the same way prost does. Code is generated by `build.rs`.

pub mod federatedrec {
    pub mod mf {
        include!(concat!(env!("OUT_DIR"), "/federatedrec.mf.rs"));
    }
}

// Convenience re-exports for the model-meta messages.
pub use federatedrec::mf::{EarlyStopParam, HeteroMfParam, MfOptimizerParam};

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_default_message_encodes_empty() {
        let pb = HeteroMfParam::default();
        assert!(pb.encode_to_vec().is_empty());
        let decoded = HeteroMfParam::decode(&[][..]).unwrap();
        assert_eq!(decoded, pb);
        assert!(decoded.early_stop.is_none());
        assert!(decoded.optimizer.is_none());
    }

    #[test]
    fn test_hetero_mf_param_roundtrip_prost() {
        let pb = HeteroMfParam {
            secure_aggregate: true,
            aggregate_every_n_epoch: 1,
            batch_size: -1,
            max_iter: 100,
            early_stop: Some(EarlyStopParam {
                early_stop: "diff".to_string(),
                eps: 1e-4,
            }),
            metrics: vec!["rmse".to_string(), "mae".to_string()],
            optimizer: Some(MfOptimizerParam {
                optimizer: "sgd".to_string(),
                args: r#"{"learning_rate":0.01}"#.to_string(),
            }),
            loss: "mse".to_string(),
            embed_dim: 10,
        };
        let bytes = pb.encode_to_vec();
        let decoded = HeteroMfParam::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, pb);
        assert_eq!(decoded.metrics, vec!["rmse", "mae"]);
    }

    #[test]
    fn test_schema_field_numbers() {
        // embed_dim = 9, varint wire type: key byte is (9 << 3) | 0.
        let pb = HeteroMfParam {
            embed_dim: 3,
            ..Default::default()
        };
        assert_eq!(pb.encode_to_vec(), vec![9 << 3, 3]);

        // early_stop = 5, length-delimited wire type.
        let pb = HeteroMfParam {
            early_stop: Some(EarlyStopParam {
                early_stop: "abs".to_string(),
                eps: 0.0,
            }),
            ..Default::default()
        };
        let bytes = pb.encode_to_vec();
        assert_eq!(bytes[0], (5 << 3) | 2);
    }

    #[test]
    fn test_every_field_key() {
        const VARINT: u8 = 0;
        const FIXED64: u8 = 1;
        const LEN: u8 = 2;
        let key = |tag: u8, wire: u8| (tag << 3) | wire;

        let cases: Vec<(HeteroMfParam, u8)> = vec![
            (HeteroMfParam { secure_aggregate: true, ..Default::default() }, key(1, VARINT)),
            (HeteroMfParam { aggregate_every_n_epoch: 1, ..Default::default() }, key(2, VARINT)),
            (HeteroMfParam { batch_size: -1, ..Default::default() }, key(3, VARINT)),
            (HeteroMfParam { max_iter: 1, ..Default::default() }, key(4, VARINT)),
            (HeteroMfParam { metrics: vec!["auc".to_string()], ..Default::default() }, key(6, LEN)),
            (
                HeteroMfParam { optimizer: Some(MfOptimizerParam::default()), ..Default::default() },
                key(7, LEN),
            ),
            (HeteroMfParam { loss: "mse".to_string(), ..Default::default() }, key(8, LEN)),
        ];
        for (pb, expected) in cases {
            assert_eq!(pb.encode_to_vec()[0], expected, "{:?}", pb);
        }

        let early_stop = EarlyStopParam { early_stop: "diff".to_string(), eps: 1e-4 };
        let bytes = early_stop.encode_to_vec();
        assert_eq!(bytes[0], key(1, LEN));
        assert_eq!(bytes[6], key(2, FIXED64));

        let optimizer = MfOptimizerParam { optimizer: "sgd".to_string(), args: "{}".to_string() };
        let bytes = optimizer.encode_to_vec();
        assert_eq!(bytes[0], key(1, LEN));
        assert_eq!(bytes[5], key(2, LEN));
    }
}
