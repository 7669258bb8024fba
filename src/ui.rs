use crate::catalog::Section;
use crate::models::{DashboardView, WorkoutRecord};
use crate::notify::NoticeView;

pub fn render_index(view: &DashboardView, notices: &[NoticeView]) -> String {
    fill(
        INDEX_HTML,
        &[
            ("STREAK", view.stats.streak.to_string()),
            ("TOTAL", view.stats.total_workouts.to_string()),
            ("HISTORY", render_history(&view.workouts)),
            ("SECTIONS", render_sections()),
            ("VIEW_JSON", script_json(view)),
            ("NOTICES_JSON", script_json(&notices)),
        ],
    )
}

/// Substitutes `{{KEY}}` placeholders in one pass, so inserted text is never
/// scanned again.
fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let placeholder = after.find("}}").and_then(|end| {
            values
                .iter()
                .find(|(key, _)| *key == &after[..end])
                .map(|(_, value)| (end, value))
        });
        match placeholder {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn render_history(workouts: &[WorkoutRecord]) -> String {
    if workouts.is_empty() {
        return r#"<p class="empty">No workouts yet. Add one!</p>"#.to_string();
    }
    workouts
        .iter()
        .map(|workout| {
            format!(
                r#"<div class="history-item"><p class="date"><strong>{}</strong></p><p class="exercise">{}</p><p class="details">{} lbs &times; {} reps &times; {} sets</p></div>"#,
                escape_html(&workout.date),
                escape_html(&workout.exercise),
                escape_html(&workout.weight),
                escape_html(&workout.reps),
                escape_html(&workout.sets),
            )
        })
        .collect()
}

fn render_sections() -> String {
    Section::ALL
        .iter()
        .map(|section| {
            format!(
                r#"<div class="section-card"><h3>{}</h3><ul class="generated" id="list-{}"><li>Press generate for a fresh set.</li></ul><button class="btn-generate" type="button" data-section="{}">Generate Workout</button></div>"#,
                section.title(),
                section.as_str(),
                section.as_str(),
            )
        })
        .collect()
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// JSON that is safe to inline inside a `<script>` element.
fn script_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>RepTrack</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600&display=swap');

    :root {
      --bg-1: #f4f1ff;
      --bg-2: #d9ccff;
      --ink: #1f1b2e;
      --accent: #7b4cff;
      --accent-2: #a37bff;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(64, 38, 140, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ece6ff 60%, #f8f6ff 100%);
      color: var(--ink);
      font-family: "Inter", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #5f5a70;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat,
    .card,
    .section-card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(64, 38, 140, 0.08);
    }

    .stat .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #857f98;
    }

    .stat .value {
      display: block;
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent);
    }

    form.workout-form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 12px;
      position: relative;
    }

    input {
      border: 1px solid rgba(64, 38, 140, 0.2);
      border-radius: 12px;
      padding: 12px 14px;
      font-size: 1rem;
      font-family: inherit;
    }

    .search-wrap {
      position: relative;
    }

    .search-wrap input {
      width: 100%;
    }

    #exerciseResults {
      position: absolute;
      z-index: 5;
      left: 0;
      right: 0;
      margin: 4px 0 0;
      padding: 0;
      list-style: none;
      background: white;
      border-radius: 12px;
      box-shadow: 0 12px 24px rgba(64, 38, 140, 0.15);
    }

    #exerciseResults li {
      padding: 10px 14px;
      cursor: pointer;
    }

    #exerciseResults li:hover {
      background: var(--bg-1);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      color: white;
      background: linear-gradient(90deg, var(--accent), var(--accent-2));
    }

    button.btn-clear {
      background: #e74c3c;
    }

    .history-list {
      display: grid;
      gap: 10px;
      max-height: 360px;
      overflow-y: auto;
    }

    .history-item p {
      margin: 2px 0;
    }

    .history-item {
      padding: 10px 14px;
      border-left: 4px solid var(--accent);
      background: var(--bg-1);
      border-radius: 10px;
    }

    .sections {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .generated {
      padding-left: 18px;
      min-height: 120px;
    }

    #chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-point {
      fill: var(--accent-2);
    }

    .chart-grid {
      stroke: rgba(64, 38, 140, 0.12);
    }

    .chart-label {
      fill: #6f6985;
      font-size: 11px;
    }

    .toasts {
      position: fixed;
      top: 20px;
      right: 20px;
      display: grid;
      gap: 8px;
      z-index: 9999;
    }

    .toast {
      padding: 10px 20px;
      border-radius: 10px;
      color: white;
      font-weight: 600;
      box-shadow: 0 4px 10px rgba(0, 0, 0, 0.2);
      transition: opacity 0.5s ease;
      background: #555;
    }

    .toast[data-kind="success"] {
      background: linear-gradient(90deg, var(--accent), var(--accent-2));
    }

    .toast[data-kind="error"] {
      background: #e74c3c;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <div class="toasts" id="toasts"></div>
  <main class="app">
    <header>
      <h1>RepTrack</h1>
      <p class="subtitle">Log your lifts, keep the streak alive, watch the numbers climb.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Day streak</span>
        <span id="streakCount" class="value">{{STREAK}}</span>
      </div>
      <div class="stat">
        <span class="label">Workouts logged</span>
        <span id="totalCount" class="value">{{TOTAL}}</span>
      </div>
    </section>

    <section class="card">
      <h2>Log a workout</h2>
      <form class="workout-form" id="workoutForm" method="post" action="/workouts/add">
        <div class="search-wrap">
          <input id="exerciseSearch" name="exercise" placeholder="Exercise" autocomplete="off" />
          <ul id="exerciseResults"></ul>
        </div>
        <input id="weight" name="weight" placeholder="Weight (lbs)" inputmode="decimal" />
        <input id="reps" name="reps" placeholder="Reps" inputmode="numeric" />
        <input id="sets" name="sets" placeholder="Sets" inputmode="numeric" />
        <button type="submit">Save workout</button>
      </form>
    </section>

    <section class="card">
      <h2>Progress</h2>
      <svg id="chart" viewBox="0 0 600 260" aria-label="Weight progress" role="img"></svg>
    </section>

    <section class="card">
      <h2>History</h2>
      <div class="history-list" id="historyList">{{HISTORY}}</div>
      <form id="clearForm" method="post" action="/workouts/clear">
        <button class="btn-clear" id="clearHistoryBtn" type="submit">Clear history</button>
      </form>
    </section>

    <section>
      <h2>Need ideas?</h2>
      <div class="sections">{{SECTIONS}}</div>
    </section>
  </main>

  <script>
    const initialView = {{VIEW_JSON}};
    const initialNotices = {{NOTICES_JSON}};

    const streakEl = document.getElementById('streakCount');
    const totalEl = document.getElementById('totalCount');
    const historyEl = document.getElementById('historyList');
    const chartEl = document.getElementById('chart');
    const toastsEl = document.getElementById('toasts');
    const form = document.getElementById('workoutForm');
    const clearForm = document.getElementById('clearForm');
    const searchInput = document.getElementById('exerciseSearch');
    const resultsEl = document.getElementById('exerciseResults');

    const escapeHtml = (value) =>
      String(value).replace(/[&<>"']/g, (ch) => ({
        '&': '&amp;',
        '<': '&lt;',
        '>': '&gt;',
        '"': '&quot;',
        "'": '&#39;'
      })[ch]);

    const showNotice = (notice) => {
      const el = document.createElement('div');
      el.className = 'toast';
      el.dataset.kind = notice.kind;
      el.textContent = notice.message;
      toastsEl.appendChild(el);
      setTimeout(() => {
        el.style.opacity = '0';
        setTimeout(() => el.remove(), 500);
      }, notice.remaining_ms);
    };

    const pullNotices = async () => {
      const res = await fetch('/api/notifications');
      if (res.ok) {
        (await res.json()).forEach(showNotice);
      }
    };

    const renderHistory = (workouts) => {
      if (!workouts.length) {
        historyEl.innerHTML = '<p class="empty">No workouts yet. Add one!</p>';
        return;
      }
      historyEl.innerHTML = workouts
        .map((w) => `
          <div class="history-item">
            <p class="date"><strong>${escapeHtml(w.date)}</strong></p>
            <p class="exercise">${escapeHtml(w.exercise)}</p>
            <p class="details">${escapeHtml(w.weight)} lbs &times; ${escapeHtml(w.reps)} reps &times; ${escapeHtml(w.sets)} sets</p>
          </div>`)
        .join('');
    };

    // Rebuilt from scratch on every change; null values are skipped.
    const renderChart = (progress) => {
      chartEl.innerHTML = '';
      const points = progress.labels
        .map((label, index) => ({ label, value: progress.values[index] }))
        .filter((point) => typeof point.value === 'number' && Number.isFinite(point.value));
      if (!points.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }

      const width = 600;
      const height = 260;
      const paddingX = 44;
      const paddingY = 34;
      const top = 24;

      const values = points.map((point) => point.value);
      let min = Math.min(...values);
      let max = Math.max(...values);
      if (min === max) {
        min -= 1;
        max += 1;
      }

      const range = max - min;
      const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const scaleY = (height - top - paddingY) / range;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - (value - min) * scaleY;

      const path = points
        .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(point.value).toFixed(2)}`)
        .join(' ');

      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = min + (range * i) / 4;
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${y(value) + 4}" text-anchor="end">${Math.round(value)}</text>`;
      }

      const labelEvery = Math.max(1, Math.ceil(points.length / 8));
      const labels = points
        .map((point, index) => index % labelEvery === 0
          ? `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${escapeHtml(point.label.slice(5))}</text>`
          : '')
        .join('');
      const circles = points
        .map((point, index) => `<circle class="chart-point" cx="${x(index)}" cy="${y(point.value)}" r="5" />`)
        .join('');

      chartEl.innerHTML = `${grid}<path class="chart-line" d="${path}" />${circles}${labels}`;
    };

    const render = (view) => {
      streakEl.textContent = view.stats.streak;
      totalEl.textContent = view.stats.total_workouts;
      renderHistory(view.workouts);
      renderChart(view.stats.progress);
    };

    const send = async (method, body) => {
      const res = await fetch('/api/workouts', {
        method,
        headers: { 'content-type': 'application/json' },
        body: body ? JSON.stringify(body) : undefined
      });
      const ok = res.ok;
      if (ok) {
        render(await res.json());
      }
      await pullNotices();
      return ok;
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const payload = {
        exercise: searchInput.value.trim(),
        weight: document.getElementById('weight').value.trim(),
        reps: document.getElementById('reps').value.trim(),
        sets: document.getElementById('sets').value.trim()
      };
      send('POST', payload)
        .then((ok) => ok && form.reset())
        .catch((err) => showNotice({ kind: 'error', message: err.message, remaining_ms: 2000 }));
    });

    clearForm.addEventListener('submit', (event) => {
      event.preventDefault();
      if (!confirm('Are you sure you want to clear all workouts?')) {
        return;
      }
      send('DELETE').catch((err) => showNotice({ kind: 'error', message: err.message, remaining_ms: 2000 }));
    });

    document.querySelectorAll('.btn-generate').forEach((btn) => {
      btn.addEventListener('click', async () => {
        const list = document.getElementById(`list-${btn.dataset.section}`);
        list.innerHTML = '<li>Generating your new workout...</li>';
        const res = await fetch(`/api/generate/${btn.dataset.section}`);
        const workout = res.ok ? await res.json() : { exercises: [] };
        if (!workout.exercises.length) {
          list.innerHTML = '<li>No exercises found. Try again later.</li>';
          return;
        }
        list.innerHTML = workout.exercises
          .map((ex) => `<li><strong>${escapeHtml(ex.name)}</strong><br><span>${ex.sets} sets &times; ${ex.reps} reps</span></li>`)
          .join('');
        btn.textContent = 'Workout Updated!';
        setTimeout(() => (btn.textContent = 'Generate Workout'), 1500);
      });
    });

    // The server debounces and flags superseded queries.
    searchInput.addEventListener('input', async () => {
      const query = searchInput.value.trim();
      if (query.length < 2) {
        resultsEl.innerHTML = '';
      }
      const res = await fetch(`/api/search?q=${encodeURIComponent(query)}`);
      if (!res.ok) {
        return;
      }
      const found = await res.json();
      if (found.superseded || found.query !== searchInput.value.trim()) {
        return;
      }
      resultsEl.innerHTML = found.results.map((name) => `<li>${escapeHtml(name)}</li>`).join('');
      resultsEl.querySelectorAll('li').forEach((li) => {
        li.addEventListener('click', () => {
          searchInput.value = li.textContent;
          resultsEl.innerHTML = '';
        });
      });
    });

    render(initialView);
    initialNotices.forEach(showNotice);
  </script>
</body>
</html>
"#;
