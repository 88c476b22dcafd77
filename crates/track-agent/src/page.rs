//! Inline dashboard page
//!
//! One self-contained HTML document that polls the metrics API on the
//! configured interval. Kept inline so the daemon ships as a single
//! binary with no asset directory.

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Cluster Metrics Dashboard</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .status-running { color: #10b981; }
        .status-pending { color: #f59e0b; }
        .gpu-hot { background-color: #fee2e2; border-color: #ef4444; }
    </style>
</head>
<body class="bg-gray-100 min-h-screen">
    <div class="container mx-auto px-4 py-8">
        <h1 class="text-4xl font-bold text-gray-800 mb-8">Cluster Metrics Dashboard</h1>

        <div class="grid grid-cols-1 md:grid-cols-3 gap-6 mb-8">
            <div class="bg-white rounded-lg shadow-lg p-6">
                <h3 class="text-lg font-semibold text-gray-700 mb-2">CPU Usage</h3>
                <div class="text-3xl font-bold text-blue-600" id="cpu-usage">--.-%</div>
            </div>
            <div class="bg-white rounded-lg shadow-lg p-6">
                <h3 class="text-lg font-semibold text-gray-700 mb-2">Memory Usage</h3>
                <div class="text-3xl font-bold text-green-600" id="memory-usage">--.-%</div>
                <div class="text-sm text-gray-500" id="memory-details">-- / -- GB</div>
            </div>
            <div class="bg-white rounded-lg shadow-lg p-6">
                <h3 class="text-lg font-semibold text-gray-700 mb-2">Last Updated</h3>
                <div class="text-lg font-semibold text-gray-600" id="last-updated">--:--:--</div>
            </div>
        </div>

        <div class="mb-8">
            <h2 class="text-2xl font-bold text-gray-800 mb-4">GPU Status</h2>
            <div id="gpu-container" class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div class="bg-white rounded-lg shadow-lg p-6 text-gray-500">No GPU data available</div>
            </div>
        </div>

        <div class="mb-8">
            <h2 class="text-2xl font-bold text-gray-800 mb-4">Scheduler Jobs</h2>
            <div class="bg-white rounded-lg shadow-lg overflow-x-auto">
                <table class="min-w-full">
                    <thead class="bg-gray-50">
                        <tr>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">Job ID</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">Name</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">User</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">State</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">CPUs</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">Memory</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">Walltime</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">Nodes</th>
                        </tr>
                    </thead>
                    <tbody id="job-rows">
                        <tr><td colspan="8" class="px-6 py-4 text-gray-500">Loading...</td></tr>
                    </tbody>
                </table>
            </div>
        </div>
    </div>

    <script>
        const POLL_INTERVAL_MS = {poll_interval_ms};

        function escapeHtml(text) {
            const div = document.createElement('div');
            div.textContent = String(text);
            return div.innerHTML;
        }

        function renderGpus(gpus) {
            const container = document.getElementById('gpu-container');
            if (!gpus.length) {
                container.innerHTML = '<div class="bg-white rounded-lg shadow-lg p-6 text-gray-500">No GPU data available</div>';
                return;
            }
            container.innerHTML = gpus.map(gpu => `
                <div class="bg-white rounded-lg shadow-lg p-6 border ${gpu.is_hot ? 'gpu-hot' : 'border-transparent'}">
                    <div class="font-semibold text-gray-800">${escapeHtml(gpu.gpu_name)}</div>
                    <div class="text-sm text-gray-500 mb-2">${escapeHtml(gpu.uuid)}</div>
                    <div class="text-sm">Temp: <b>${gpu.temperature}&deg;C</b>
                        &middot; GPU: <b>${gpu.gpu_utilization}%</b>
                        &middot; Mem: <b>${gpu.memory_used} / ${gpu.memory_total} MB</b></div>
                </div>`).join('');
        }

        function renderJobs(jobs) {
            const body = document.getElementById('job-rows');
            if (!jobs.length) {
                body.innerHTML = '<tr><td colspan="8" class="px-6 py-4 text-gray-500">No jobs in queue</td></tr>';
                return;
            }
            body.innerHTML = jobs.map(job => `
                <tr class="border-t">
                    <td class="px-6 py-3">${escapeHtml(job.id)}</td>
                    <td class="px-6 py-3">${escapeHtml(job.name)}</td>
                    <td class="px-6 py-3">${escapeHtml(job.user)}</td>
                    <td class="px-6 py-3 font-semibold status-${escapeHtml(job.state).toLowerCase()}">${escapeHtml(job.state)}</td>
                    <td class="px-6 py-3">${escapeHtml(job.cpus)}</td>
                    <td class="px-6 py-3">${escapeHtml(job.memory)}</td>
                    <td class="px-6 py-3">${escapeHtml(job.walltime)}</td>
                    <td class="px-6 py-3">${escapeHtml(job.nodelist)}</td>
                </tr>`).join('');
        }

        async function refresh() {
            try {
                const response = await fetch('/api/metrics');
                if (!response.ok) {
                    document.getElementById('last-updated').textContent =
                        response.status === 401 ? 'unauthorized' : 'error ' + response.status;
                    return;
                }
                const data = await response.json();
                const stats = data.system_stats;
                document.getElementById('cpu-usage').textContent = stats.cpu_usage_percent + '%';
                document.getElementById('memory-usage').textContent = stats.memory_usage_percent + '%';
                document.getElementById('memory-details').textContent =
                    stats.memory_used_gb + ' / ' + stats.memory_total_gb + ' GB';
                document.getElementById('last-updated').textContent = new Date().toLocaleTimeString();
                renderGpus(data.gpu_stats);
                renderJobs(data.slurm_jobs);
            } catch (err) {
                document.getElementById('last-updated').textContent = 'unreachable';
            }
        }

        refresh();
        setInterval(refresh, POLL_INTERVAL_MS);
    </script>
</body>
</html>
"#;

/// Render the dashboard page for the given poll interval
pub fn render(poll_interval_seconds: u64) -> String {
    PAGE_TEMPLATE.replace(
        "{poll_interval_ms}",
        &(poll_interval_seconds * 1000).to_string(),
    )
}
