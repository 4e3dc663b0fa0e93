//! Static upload page served at `/`.

use axum::response::Html;

/// `GET /` — patient form with multi-file upload.
pub async fn index() -> Html<&'static str> {
    Html(UPLOAD_PAGE_HTML)
}

const UPLOAD_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Discharge Summary Generator</title>
  <style>
    * { box-sizing: border-box; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #f5f7fa; color: #1f2933; margin: 0; padding: 24px;
    }
    main { max-width: 880px; margin: 0 auto; }
    h1 { color: #0d47a1; font-size: 26px; margin-bottom: 4px; }
    .subtitle { color: #616e7c; font-size: 14px; margin-bottom: 24px; }
    form {
      background: #fff; border: 1px solid #d9e2ec; border-radius: 8px;
      padding: 20px; display: grid; gap: 14px;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
    }
    label { display: flex; flex-direction: column; font-size: 13px; font-weight: 600; gap: 6px; }
    input { font-size: 15px; padding: 8px 10px; border: 1px solid #bcccdc; border-radius: 6px; }
    .wide { grid-column: 1 / -1; }
    .actions { display: flex; gap: 10px; flex-wrap: wrap; }
    button {
      font-size: 15px; font-weight: 600; padding: 10px 18px; border-radius: 6px;
      border: none; cursor: pointer; background: #0d47a1; color: #fff;
    }
    button.secondary { background: #e3f2fd; color: #0d47a1; }
    button:disabled { opacity: 0.5; cursor: default; }
    #status { margin: 16px 0; font-size: 14px; }
    #status.error { color: #b71c1c; }
    #result { margin-top: 16px; }
    #result-actions { display: none; margin-top: 16px; }
    @media print {
      body { background: #fff; padding: 0; }
      h1, .subtitle, form, #status, #result-actions { display: none !important; }
    }
  </style>
</head>
<body>
<main>
  <h1>Discharge Summary Generator</h1>
  <p class="subtitle">Upload patient documents (PDF, DOCX or TXT) to draft a discharge summary. For testing purposes only.</p>

  <form id="summary-form">
    <label>Patient name <input name="name" required></label>
    <label>Patient ID <input name="id" required></label>
    <label>Date of birth <input name="dob" type="date" required></label>
    <label>Admission date <input name="admissionDate" type="date" required></label>
    <label>Discharge date <input name="dischargeDate" type="date" required></label>
    <label class="wide">Documents <input name="files" type="file" multiple accept=".pdf,.docx,.txt" required></label>
    <div class="actions wide">
      <button type="submit" id="generate">Generate summary</button>
    </div>
  </form>

  <div id="status"></div>
  <div id="result"></div>
  <div id="result-actions" class="actions">
    <button type="button" class="secondary" id="download">Download HTML</button>
    <button type="button" class="secondary" id="print">Print</button>
  </div>
</main>

<script>
  const form = document.getElementById('summary-form');
  const statusEl = document.getElementById('status');
  const resultEl = document.getElementById('result');
  const actionsEl = document.getElementById('result-actions');
  const generateBtn = document.getElementById('generate');

  function setStatus(text, isError) {
    statusEl.textContent = text;
    statusEl.className = isError ? 'error' : '';
  }

  async function errorMessage(response) {
    try {
      const body = await response.json();
      return body.error && body.error.message ? body.error.message : response.statusText;
    } catch (_) {
      return response.statusText;
    }
  }

  form.addEventListener('submit', async (event) => {
    event.preventDefault();
    generateBtn.disabled = true;
    actionsEl.style.display = 'none';
    resultEl.innerHTML = '';
    setStatus('Generating summary...', false);

    try {
      const response = await fetch('/api/generate-summary', { method: 'POST', body: new FormData(form) });
      if (!response.ok) {
        setStatus(await errorMessage(response), true);
        return;
      }
      const body = await response.json();
      resultEl.innerHTML = body.summary;
      actionsEl.style.display = 'flex';
      setStatus('', false);
    } catch (err) {
      setStatus('Request failed: ' + err, true);
    } finally {
      generateBtn.disabled = false;
    }
  });

  document.getElementById('download').addEventListener('click', async () => {
    const response = await fetch('/api/generate-summary/download', { method: 'POST', body: new FormData(form) });
    if (!response.ok) {
      setStatus(await errorMessage(response), true);
      return;
    }
    const disposition = response.headers.get('Content-Disposition') || '';
    const match = disposition.match(/filename="([^"]+)"/);
    const blob = await response.blob();
    const link = document.createElement('a');
    link.href = URL.createObjectURL(blob);
    link.download = match ? match[1] : 'discharge_summary.html';
    link.click();
    URL.revokeObjectURL(link.href);
  });

  document.getElementById('print').addEventListener('click', () => window.print());
</script>
</body>
</html>
"#;
