//! Template file contents

/// Query module exposing `getAll`, `getById`, `create`, `update`, `delete`
pub const QUERY_JS: &str = r"import { query } from '{{pool_import}}';

const queries = {
  getAll: 'SELECT * FROM {{table_name}} ORDER BY id ASC',
  getById: 'SELECT * FROM {{table_name}} WHERE id = $1',
  create: 'INSERT INTO {{table_name}} ({{insert_columns}}) VALUES ({{insert_placeholders}}) RETURNING *',
  update: 'UPDATE {{table_name}} SET {{update_assignments}} WHERE id = {{update_id_placeholder}} RETURNING *',
  delete: 'DELETE FROM {{table_name}} WHERE id = $1'
};

const {{model_name}} = {
  getAll: async (params = []) => {
    const res = await query(queries.getAll, params);
    return res.rows;
  },
  getById: async (params = []) => {
    const res = await query(queries.getById, params);
    return res.rows[0];
  },
  create: async (params = []) => {
    const res = await query(queries.create, params);
    return res.rows[0];
  },
  update: async (params = []) => {
    const res = await query(queries.update, params);
    return res.rows[0];
  },
  delete: async (params = []) => {
    await query(queries.delete, params);
    return { deleted: params[0] };
  }
};

export default {{model_name}};
";

/// Express controller calling the query module through the db registry
pub const CONTROLLER_JS: &str = r"import db from '{{db_import}}';

function read{{display_name}}(body = {}) {
  return [
{{#each fields}}
    {{coerced}},
{{/each}}
  ];
}

export async function getAll(req, res, next) {
  try {
    const rows = await db.{{model_name}}.getAll();
    res.json(rows);
  } catch (err) {
    next(err);
  }
}

export async function getById(req, res, next) {
  try {
    const row = await db.{{model_name}}.getById([req.params.id]);
    if (!row) {
      return res.status(404).json({ error: '{{display_name}} not found' });
    }
    res.json(row);
  } catch (err) {
    next(err);
  }
}

export async function create(req, res, next) {
  try {
    const row = await db.{{model_name}}.create(read{{display_name}}(req.body));
    res.status(201).json(row);
  } catch (err) {
    next(err);
  }
}

export async function update(req, res, next) {
  try {
    const row = await db.{{model_name}}.update([...read{{display_name}}(req.body), req.params.id]);
    if (!row) {
      return res.status(404).json({ error: '{{display_name}} not found' });
    }
    res.json(row);
  } catch (err) {
    next(err);
  }
}

export async function remove(req, res, next) {
  try {
    const result = await db.{{model_name}}.delete([req.params.id]);
    res.json(result);
  } catch (err) {
    next(err);
  }
}
";

/// Express router wiring the controller handlers
pub const ROUTES_JS: &str = r"import { Router } from 'express';
import * as {{model_name}}Controller from '{{controller_import}}';

const router = Router();

router.get('/', {{model_name}}Controller.getAll);
router.get('/:id', {{model_name}}Controller.getById);
router.post('/', {{model_name}}Controller.create);
router.put('/:id', {{model_name}}Controller.update);
router.delete('/:id', {{model_name}}Controller.remove);

export default router;
";

/// Shared node-postgres pool, written once per project
pub const POOL_JS: &str = r"import pg from 'pg';

const pool = new pg.Pool({
  connectionString: process.env.DATABASE_URL
});

export async function query(text, params) {
  const client = await pool.connect();
  try {
    return await client.query(text, params);
  } finally {
    client.release();
  }
}

export default pool;
";
