//! Canned command runners and tool output samples for tests
//!
//! The samples mirror real `squeue`/`nvidia-smi` output for a small GPU
//! cluster so collector tests exercise the exact shapes the live tools
//! produce.

use crate::{CollectError, CommandRunner, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Four-job queue sample, as the tool prints it with its header line
pub(crate) const MOCK_SQUEUE_OUTPUT: &str = "\
JOBID,NAME,USER,STATE,NODES,CPUS,MEMORY,SUBMIT_TIME,START_TIME,TIME_LEFT,NODELIST(REASON)
72892,bash,user1,RUNNING,1,1,500M,2025-10-04T10:00:00,2025-10-04T10:00:05,3-00:00:00,gpu-node-01
72893,train,user2,RUNNING,1,8,16G,2025-10-04T10:01:00,2025-10-04T10:01:10,2-12:00:00,gpu-node-02
72894,data,user1,PENDING,1,2,4G,2025-10-04T10:02:00,N/A,4-00:00:00,(Resources)
72895,jupyter,user3,PENDING,1,4,8G,2025-10-04T10:03:00,N/A,7-00:00:00,(Priority)
";

/// The same queue sample as `squeue --noheader` emits it
pub(crate) const MOCK_SQUEUE_ROWS: &str = "\
72892,bash,user1,RUNNING,1,1,500M,2025-10-04T10:00:00,2025-10-04T10:00:05,3-00:00:00,gpu-node-01
72893,train,user2,RUNNING,1,8,16G,2025-10-04T10:01:00,2025-10-04T10:01:10,2-12:00:00,gpu-node-02
72894,data,user1,PENDING,1,2,4G,2025-10-04T10:02:00,N/A,4-00:00:00,(Resources)
72895,jupyter,user3,PENDING,1,4,8G,2025-10-04T10:03:00,N/A,7-00:00:00,(Priority)
";

/// Two-device sample with the tool's own (padded) header line
pub(crate) const MOCK_NVIDIA_SMI_OUTPUT: &str = "\
uuid,name,temperature.gpu,memory.total,memory.used,memory.free,utilization.gpu,utilization.memory
GPU-d49e29a8-3f5f-4a6d-9be2-4a4a5b6c7d8e,NVIDIA GeForce RTX 3090,55,24576,10240,14336,80,42
GPU-a1b2c3d4-e5f6-a7b8-c9d0-e1f2a3b4c5d6,NVIDIA GeForce RTX 3090,65,24576,20480,4096,95,83
";

/// The same device sample as `--format=csv,noheader,nounits` emits it
pub(crate) const MOCK_NVIDIA_SMI_ROWS: &str = "\
GPU-d49e29a8-3f5f-4a6d-9be2-4a4a5b6c7d8e, NVIDIA GeForce RTX 3090, 55, 24576, 10240, 14336, 80, 42
GPU-a1b2c3d4-e5f6-a7b8-c9d0-e1f2a3b4c5d6, NVIDIA GeForce RTX 3090, 65, 24576, 20480, 4096, 95, 83
";

/// Runner that returns one canned result regardless of the command
pub(crate) struct StaticRunner(pub std::result::Result<&'static str, &'static str>);

#[async_trait]
impl CommandRunner for StaticRunner {
    async fn run(&self, command: &str) -> Result<String> {
        match self.0 {
            Ok(stdout) => Ok(stdout.to_string()),
            Err(stderr) => Err(CollectError::Command {
                command: command.to_string(),
                stderr: stderr.to_string(),
            }),
        }
    }
}

/// Runner that dispatches on the invoked program name.
///
/// Programs missing from the script fail the way the shell reports an
/// absent tool, which is how "no GPU tool installed" looks in production.
pub(crate) struct ScriptedRunner {
    responses: HashMap<&'static str, std::result::Result<&'static str, &'static str>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    pub(crate) fn on(
        mut self,
        program: &'static str,
        response: std::result::Result<&'static str, &'static str>,
    ) -> Self {
        self.responses.insert(program, response);
        self
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &str) -> Result<String> {
        let program = command.split_whitespace().next().unwrap_or("");
        match self.responses.get(program) {
            Some(Ok(stdout)) => Ok(stdout.to_string()),
            Some(Err(stderr)) => Err(CollectError::Command {
                command: command.to_string(),
                stderr: stderr.to_string(),
            }),
            None => Err(CollectError::Command {
                command: command.to_string(),
                stderr: format!("sh: {program}: command not found"),
            }),
        }
    }
}
