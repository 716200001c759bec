//! Parallel compression of independent inputs.
//!
//! Dictionaries are local to each call, so inputs need no coordination:
//! - Main thread: send `(id, input)` jobs, then collect results by id
//! - Worker pool: run the codec on each job

use crossbeam::channel::{bounded, unbounded, Receiver, Sender};
use log::debug;

use crate::error::{Error, Result};
use crate::{CodecConfig, CompressStats, DecompressStats, Lz78Codec};

/// Runs an [`Lz78Codec`] over many inputs on a worker pool
pub struct BatchCodec {
    codec: Lz78Codec,
}

impl BatchCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { codec: Lz78Codec::new(config) }
    }

    pub fn codec(&self) -> &Lz78Codec {
        &self.codec
    }

    fn effective_threads(&self, jobs: usize) -> usize {
        let threads = match self.codec.config().num_threads {
            0 => num_cpus::get().clamp(1, 32),
            n => n.clamp(1, 32),
        };
        threads.min(jobs.max(1))
    }

    /// Compress every input; results are in input order and fail independently
    pub fn compress_all<B>(&self, inputs: &[B]) -> Result<Vec<Result<(Vec<u8>, CompressStats)>>>
    where
        B: AsRef<[u8]> + Sync,
    {
        self.run(inputs, |codec, input| codec.compress(input))
    }

    /// Decompress every input; results are in input order and fail independently
    pub fn decompress_all<B>(
        &self,
        inputs: &[B],
    ) -> Result<Vec<Result<(Vec<u8>, DecompressStats)>>>
    where
        B: AsRef<[u8]> + Sync,
    {
        self.run(inputs, |codec, input| codec.decompress(input))
    }

    fn run<B, T, F>(&self, inputs: &[B], job: F) -> Result<Vec<Result<T>>>
    where
        B: AsRef<[u8]> + Sync,
        T: Send,
        F: Fn(&Lz78Codec, &[u8]) -> Result<T> + Sync,
    {
        let num_threads = self.effective_threads(inputs.len());
        debug!("running {} jobs on {} threads", inputs.len(), num_threads);

        // For single thread, skip the pool entirely
        if num_threads == 1 {
            return Ok(inputs.iter().map(|input| job(&self.codec, input.as_ref())).collect());
        }

        // Jobs are bounded to keep memory flat; results are unbounded so a
        // worker never blocks while the main thread is still sending
        let (job_tx, job_rx): (Sender<(usize, &[u8])>, Receiver<(usize, &[u8])>) =
            bounded(num_threads * 4);
        let (result_tx, result_rx): (Sender<(usize, Result<T>)>, Receiver<(usize, Result<T>)>) =
            unbounded();

        let codec = &self.codec;
        let job = &job;

        let result = crossbeam::scope(|scope| {
            for _ in 0..num_threads {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();

                scope.spawn(move |_| {
                    for (id, input) in job_rx.iter() {
                        if result_tx.send((id, job(codec, input))).is_err() {
                            break;
                        }
                    }
                });
            }

            // Drop our copies of the channels that workers use
            drop(job_rx);
            drop(result_tx);

            for (id, input) in inputs.iter().enumerate() {
                if job_tx.send((id, input.as_ref())).is_err() {
                    break;
                }
            }
            drop(job_tx);

            let mut slots: Vec<Option<Result<T>>> = inputs.iter().map(|_| None).collect();
            for (id, outcome) in result_rx.iter() {
                slots[id] = Some(outcome);
            }
            slots
        });

        let slots = result.map_err(|_| Error::Internal("Thread panicked".to_string()))?;
        slots
            .into_iter()
            .enumerate()
            .map(|(id, slot)| {
                slot.ok_or_else(|| Error::Internal(format!("no result for batch input {}", id)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> Vec<Vec<u8>> {
        (0..20)
            .map(|i| {
                let word: &[u8] = if i % 2 == 0 { b"ABRACADABRA " } else { b"MISSISSIPPI " };
                word.repeat(i + 1)
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let inputs = inputs();
        let parallel = BatchCodec::new(CodecConfig { num_threads: 4, ..Default::default() });
        let single = Lz78Codec::default();

        let results = parallel.compress_all(&inputs).unwrap();
        assert_eq!(results.len(), inputs.len());
        for (input, result) in inputs.iter().zip(results) {
            let (compressed, stats) = result.unwrap();
            let (expected, expected_stats) = single.compress(input).unwrap();
            assert_eq!(compressed, expected);
            assert_eq!(stats, expected_stats);
        }
    }

    #[test]
    fn test_round_trip() {
        let inputs = inputs();
        let batch = BatchCodec::new(CodecConfig { num_threads: 3, ..Default::default() });

        let compressed: Vec<Vec<u8>> =
            batch.compress_all(&inputs).unwrap().into_iter().map(|r| r.unwrap().0).collect();
        let restored = batch.decompress_all(&compressed).unwrap();

        for (input, result) in inputs.iter().zip(restored) {
            // Trailing spaces are symbols, not line endings, so they survive
            assert_eq!(&result.unwrap().0, input);
        }
    }

    #[test]
    fn test_failures_are_independent() {
        let inputs: Vec<&[u8]> = vec![b"GOOD", b"BAD!", b"ALSO GOOD"];
        let batch = BatchCodec::new(CodecConfig { num_threads: 2, ..Default::default() });

        let results = batch.compress_all(&inputs).unwrap();
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::UnknownSymbol { symbol: b'!', position: 3 })));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_single_thread_and_empty() {
        let batch = BatchCodec::new(CodecConfig { num_threads: 1, ..Default::default() });
        let empty: Vec<Vec<u8>> = Vec::new();
        assert!(batch.compress_all(&empty).unwrap().is_empty());

        let results = batch.compress_all(&[b"ONE".to_vec()]).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_effective_threads() {
        let batch = BatchCodec::new(CodecConfig { num_threads: 8, ..Default::default() });
        assert_eq!(batch.effective_threads(3), 3);
        assert_eq!(batch.effective_threads(100), 8);
        assert_eq!(batch.effective_threads(0), 1);

        let auto = BatchCodec::new(CodecConfig::default());
        assert!(auto.effective_threads(1000) >= 1);
    }
}
