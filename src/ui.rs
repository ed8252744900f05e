pub fn render_index() -> String {
    INDEX_HTML.to_string()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Run Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef5f0;
      --bg-2: #b9e4c9;
      --ink: #1f2a24;
      --accent: #2f9e62;
      --accent-2: #2f4858;
      --warn: #d9480f;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3f3e9 60%, #f4faf6 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", Georgia, serif;
      margin: 0;
      font-size: 2.2rem;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
    }

    input, select, button {
      font: inherit;
      padding: 10px 14px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    button {
      cursor: pointer;
      border: none;
      color: #fff;
      background: var(--accent);
    }

    button.stop {
      background: var(--accent-2);
    }

    .readout {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 16px;
    }

    .stat {
      background: #fff;
      border-radius: 18px;
      padding: 18px;
      display: grid;
      gap: 6px;
    }

    .label {
      font-size: 0.85rem;
      opacity: 0.7;
    }

    .value {
      font-size: 1.8rem;
      font-weight: 600;
    }

    .notice {
      color: var(--warn);
      min-height: 1.2em;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    td, th {
      text-align: left;
      padding: 6px 4px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.1);
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Run Tracker</h1>

    <section class="controls">
      <input id="user" placeholder="User id" value="runner" />
      <select id="mode">
        <option value="live">Live GPS</option>
        <option value="simulated">Simulated</option>
      </select>
      <button id="start" type="button">Start</button>
      <button id="stop" class="stop" type="button" disabled>Stop</button>
    </section>

    <section class="readout">
      <div class="stat">
        <span class="label">Distance (km)</span>
        <span id="distance" class="value">0.000</span>
      </div>
      <div class="stat">
        <span class="label">Time</span>
        <span id="time" class="value">00:00</span>
      </div>
      <div class="stat">
        <span class="label">Status</span>
        <span id="state" class="value">Idle</span>
      </div>
    </section>

    <div class="notice" id="notice"></div>

    <section>
      <h2>Last 7 days</h2>
      <table>
        <thead><tr><th>Date</th><th>Runs</th><th>km</th></tr></thead>
        <tbody id="history"></tbody>
      </table>
    </section>
  </main>

  <script>
    const userEl = document.getElementById('user');
    const modeEl = document.getElementById('mode');
    const startBtn = document.getElementById('start');
    const stopBtn = document.getElementById('stop');
    const distanceEl = document.getElementById('distance');
    const timeEl = document.getElementById('time');
    const stateEl = document.getElementById('state');
    const noticeEl = document.getElementById('notice');
    const historyEl = document.getElementById('history');

    let sessionId = null;
    let watchId = null;
    let pollId = null;

    const formatTime = (seconds) => {
      const m = Math.floor(seconds / 60).toString().padStart(2, '0');
      const s = (seconds % 60).toString().padStart(2, '0');
      return `${m}:${s}`;
    };

    const post = (path, body) => fetch(path, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(body || {}),
    });

    const render = (status) => {
      distanceEl.textContent = status.total_distance.toFixed(3);
      timeEl.textContent = formatTime(status.running_time);
      stateEl.textContent = status.is_tracking ? 'Running' : 'Idle';
      noticeEl.textContent = status.notice || '';
      startBtn.disabled = status.is_tracking;
      stopBtn.disabled = !status.is_tracking;
      if (!status.is_tracking) {
        clearWatch();
      }
    };

    const clearWatch = () => {
      if (watchId !== null) {
        navigator.geolocation.clearWatch(watchId);
        watchId = null;
      }
    };

    const errorCode = (err) => {
      if (err.code === err.PERMISSION_DENIED) return 'permission_denied';
      if (err.code === err.TIMEOUT) return 'timeout';
      return 'position_unavailable';
    };

    const watchDevice = (watch) => {
      if (!('geolocation' in navigator)) {
        noticeEl.textContent = 'This browser cannot report its location.';
        return;
      }
      watchId = navigator.geolocation.watchPosition(
        (pos) => post(`/api/sessions/${sessionId}/fixes`, {
          latitude: pos.coords.latitude,
          longitude: pos.coords.longitude,
          accuracy: pos.coords.accuracy,
          timestamp: pos.timestamp,
          speed: pos.coords.speed,
        }),
        (err) => post(`/api/sessions/${sessionId}/location-errors`, { code: errorCode(err) }),
        {
          enableHighAccuracy: watch.enable_high_accuracy,
          timeout: watch.timeout_ms,
          maximumAge: watch.maximum_age_ms,
        },
      );
    };

    const poll = async () => {
      if (!sessionId) return;
      const resp = await fetch(`/api/sessions/${sessionId}/status`);
      if (resp.ok) {
        render(await resp.json());
      }
    };

    const loadHistory = async () => {
      const resp = await fetch('/api/stats');
      if (!resp.ok) return;
      const stats = await resp.json();
      historyEl.innerHTML = stats.last_7_days
        .map((day) => `<tr><td>${day.date}</td><td>${day.runs}</td><td>${day.distance_km.toFixed(3)}</td></tr>`)
        .join('');
    };

    startBtn.addEventListener('click', async () => {
      const resp = await post('/api/sessions', { user_id: userEl.value, mode: modeEl.value });
      if (!resp.ok) {
        noticeEl.textContent = await resp.text();
        return;
      }
      const session = await resp.json();
      sessionId = session.session_id;
      render(session.status);
      if (session.mode === 'live') {
        watchDevice(session.watch);
      }
      clearInterval(pollId);
      pollId = setInterval(poll, 1000);
    });

    stopBtn.addEventListener('click', async () => {
      if (!sessionId) return;
      const resp = await post(`/api/sessions/${sessionId}/stop`);
      if (resp.ok) {
        render(await resp.json());
      }
      clearInterval(pollId);
      loadHistory();
    });

    loadHistory();
  </script>
</body>
</html>
"#;
