use super::analyzer::AnalysisNode;

/// Owns the fixed-length magnitude frame the visualizer consumes.
///
/// One sampler is bound to one node's bin count; `sample` refreshes the frame
/// in place each animation tick and hands back a borrow of it.
#[derive(Debug)]
pub struct SpectrumSampler {
    frame: Vec<u8>,
}

impl SpectrumSampler {
    pub fn new(bin_count: usize) -> Self {
        Self {
            frame: vec![0; bin_count],
        }
    }

    pub fn for_node(node: &dyn AnalysisNode) -> Self {
        Self::new(node.frequency_bin_count())
    }

    /// Pull the current frequency frame from `node`.
    pub fn sample(&mut self, node: &mut dyn AnalysisNode) -> &[u8] {
        node.byte_frequency_data(&mut self.frame);
        &self.frame
    }

    /// The most recently sampled frame, without pulling a new one. This is
    /// what a paused visualizer keeps drawing.
    pub fn latest(&self) -> &[u8] {
        &self.frame
    }
}
